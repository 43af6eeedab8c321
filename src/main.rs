use config::Config;
use reading_vocab::store::{self, Backend};
use serde::Deserialize;
use tracing_subscriber::fmt::format::FmtSpan;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_database_host() -> String {
    "localhost".to_string()
}

fn default_database_port() -> u16 {
    5432
}

fn default_database_name() -> String {
    "reading_vocab".to_string()
}

fn default_database_username() -> String {
    "postgres".to_string()
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Args {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    storage: Backend,
    #[serde(default = "default_database_host")]
    database_host: String,
    #[serde(default = "default_database_port")]
    database_port: u16,
    #[serde(default = "default_database_name")]
    database_name: String,
    #[serde(default = "default_database_username")]
    database_username: String,
    #[serde(default)]
    database_password: String,
}

impl Args {
    fn db_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.database_username,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    dotenv::dotenv().ok();

    let config = Config::builder()
        .add_source(config::File::with_name("setup").required(false))
        .add_source(config::Environment::with_prefix("READING_VOCAB"))
        .build()
        .map_err(handle_errors::Error::ConfigError)?;

    let config = config
        .try_deserialize::<Args>()
        .map_err(handle_errors::Error::ConfigError)?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "handle_errors={},reading_vocab={},warp={}",
            config.log_level, config.log_level, config.log_level
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = match store::connect(config.storage, &config.db_url()).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("無法啟動儲存：{}", e);
            return Err(e);
        }
    };
    tracing::info!(storage = ?config.storage, port = config.port, "server starting");

    warp::serve(reading_vocab::api(store))
        .run(([0, 0, 0, 0], config.port))
        .await;

    Ok(())
}

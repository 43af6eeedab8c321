use config::ConfigError;
use serde::Serialize;
use sqlx::migrate::MigrateError;
use tracing::{event, instrument, Level};
use validator::ValidationErrors;
use warp::{
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, Reject, UnsupportedMediaType},
    Rejection, Reply,
};

#[derive(Debug)]
pub enum Error {
    InvalidArticle(ValidationErrors),
    InvalidWord(ValidationErrors),
    ArticleNotFound,
    WordNotFound,
    StorageUnavailable(String),
    DatabaseQueryError(sqlx::Error),
    MigrationError(MigrateError),
    ConfigError(ConfigError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidArticle(_) | Error::InvalidWord(_) => StatusCode::BAD_REQUEST,
            Error::ArticleNotFound | Error::WordNotFound => StatusCode::NOT_FOUND,
            Error::StorageUnavailable(_)
            | Error::DatabaseQueryError(_)
            | Error::MigrationError(_)
            | Error::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Backend faults never leak their cause.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidArticle(_) => "Invalid article data".to_string(),
            Error::InvalidWord(_) => "Invalid word data".to_string(),
            Error::ArticleNotFound => "Article not found".to_string(),
            Error::WordNotFound => "Word not found".to_string(),
            _ => "Storage unavailable".to_string(),
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidArticle(errors) | Error::InvalidWord(errors) => {
                serde_json::to_value(errors).ok()
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidArticle(ref errors) => write!(f, "Invalid article data: {}", errors),
            Error::InvalidWord(ref errors) => write!(f, "Invalid word data: {}", errors),
            Error::ArticleNotFound => write!(f, "Article not found"),
            Error::WordNotFound => write!(f, "Word not found"),
            Error::StorageUnavailable(ref cause) => {
                write!(f, "Storage unavailable: {}", cause)
            }
            Error::DatabaseQueryError(ref e) => {
                write!(f, "Query could not be executed: {}", e)
            }
            Error::MigrationError(ref e) => write!(f, "Migration failed: {}", e),
            Error::ConfigError(ref e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl Reject for Error {}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Error::StorageUnavailable(e.to_string())
            }
            other => Error::DatabaseQueryError(other),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

fn error_reply(
    status: StatusCode,
    error: String,
    details: Option<serde_json::Value>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error, details }), status)
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(error) = r.find::<Error>() {
        let status = error.status_code();
        if status.is_server_error() {
            event!(Level::ERROR, "{}", error);
        } else {
            event!(Level::WARN, "{}", error);
        }
        Ok(error_reply(status, error.public_message(), error.details()))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(
            StatusCode::BAD_REQUEST,
            "Invalid request body".to_string(),
            Some(serde_json::Value::String(error.to_string())),
        ))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(StatusCode::FORBIDDEN, error.to_string(), None))
    } else if let Some(error) = r.find::<PayloadTooLarge>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(StatusCode::PAYLOAD_TOO_LARGE, error.to_string(), None))
    } else if let Some(error) = r.find::<LengthRequired>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(StatusCode::LENGTH_REQUIRED, error.to_string(), None))
    } else if let Some(error) = r.find::<UnsupportedMediaType>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            error.to_string(),
            None,
        ))
    } else if let Some(error) = r.find::<MethodNotAllowed>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, error.to_string(), None))
    } else {
        Ok(error_reply(
            StatusCode::NOT_FOUND,
            "Route not found".to_string(),
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_category() {
        assert_eq!(
            Error::InvalidArticle(ValidationErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::WordNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::StorageUnavailable("connection refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_faults_hide_their_cause() {
        let error = Error::StorageUnavailable("password authentication failed".to_string());
        assert_eq!(error.public_message(), "Storage unavailable");
        assert!(error.details().is_none());
    }

    #[test]
    fn pool_timeouts_are_storage_unavailable() {
        let error: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, Error::StorageUnavailable(_)));

        let error: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, Error::DatabaseQueryError(_)));
    }
}

use std::time::Duration;

use async_trait::async_trait;
use handle_errors::Error;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, info};
use validator::Validate;

use super::{new_id, Storage};
use crate::types::article::{Article, NewArticle};
use crate::types::dictionary::{DictionaryWord, NewDictionaryWord};

fn article_from_row(row: PgRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
    }
}

fn word_from_row(row: PgRow) -> DictionaryWord {
    DictionaryWord {
        id: row.get("id"),
        word: row.get("word"),
        translation: row.get("translation"),
        context: row.get("context"),
        article_id: row.get("article_id"),
    }
}

#[derive(Clone)]
pub struct PgStore {
    pub connection: PgPool, //連接池
}

impl PgStore {
    /// Connects and runs the embedded migrations. Any failure here is meant
    /// to abort startup.
    pub async fn new(db_url: &str) -> Result<Self, Error> {
        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(db_url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => return Err(Error::StorageUnavailable(e.to_string())),
        };

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .map_err(Error::MigrationError)?;
        info!("postgres store ready");

        Ok(PgStore {
            connection: db_pool,
        })
    }
}

#[async_trait]
impl Storage for PgStore {
    async fn list_articles(&self) -> Result<Vec<Article>, Error> {
        match sqlx::query("SELECT id, title, content FROM articles")
            .map(article_from_row)
            .fetch_all(&self.connection)
            .await
        {
            Ok(articles) => Ok(articles),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>, Error> {
        match sqlx::query("SELECT id, title, content FROM articles WHERE id = $1")
            .bind(id)
            .map(article_from_row)
            .fetch_optional(&self.connection)
            .await
        {
            Ok(article) => Ok(article),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article, Error> {
        article.validate().map_err(Error::InvalidArticle)?;
        match sqlx::query(
            "INSERT INTO articles (id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, title, content",
        )
        .bind(new_id())
        .bind(article.title)
        .bind(article.content)
        .map(article_from_row)
        .fetch_one(&self.connection)
        .await
        {
            Ok(article) => Ok(article),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_article(&self, id: &str) -> Result<bool, Error> {
        let mut tx = self.connection.begin().await?;

        let removed = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&mut tx)
            .await?
            .rows_affected();
        if removed == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let words = sqlx::query("DELETE FROM dictionary_words WHERE article_id = $1")
            .bind(id)
            .execute(&mut tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        debug!(article_id = id, removed_words = words, "cascade delete");
        Ok(true)
    }

    async fn list_dictionary_words(&self) -> Result<Vec<DictionaryWord>, Error> {
        match sqlx::query(
            "SELECT id, word, translation, context, article_id FROM dictionary_words",
        )
        .map(word_from_row)
        .fetch_all(&self.connection)
        .await
        {
            Ok(words) => Ok(words),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_dictionary_word(&self, id: &str) -> Result<Option<DictionaryWord>, Error> {
        match sqlx::query(
            "SELECT id, word, translation, context, article_id FROM dictionary_words
            WHERE id = $1",
        )
        .bind(id)
        .map(word_from_row)
        .fetch_optional(&self.connection)
        .await
        {
            Ok(word) => Ok(word),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_dictionary_word(
        &self,
        word: NewDictionaryWord,
    ) -> Result<DictionaryWord, Error> {
        word.validate().map_err(Error::InvalidWord)?;
        match sqlx::query(
            "INSERT INTO dictionary_words (id, word, translation, context, article_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, word, translation, context, article_id",
        )
        .bind(new_id())
        .bind(word.word)
        .bind(word.translation)
        .bind(word.context)
        .bind(word.article_id)
        .map(word_from_row)
        .fetch_one(&self.connection)
        .await
        {
            Ok(word) => Ok(word),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_dictionary_word(&self, id: &str) -> Result<bool, Error> {
        match sqlx::query("DELETE FROM dictionary_words WHERE id = $1")
            .bind(id)
            .execute(&self.connection)
            .await
        {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(e) => Err(e.into()),
        }
    }
}

//! Persistence for articles and their saved dictionary words.
//!
//! Every backend must keep one invariant: once `delete_article` returns
//! `true`, no dictionary word pointing at that article can be read back.

mod memory;
mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;
use handle_errors::Error;
use serde::Deserialize;

use crate::types::article::{Article, NewArticle};
use crate::types::dictionary::{DictionaryWord, NewDictionaryWord};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>, Error>;

    async fn get_article(&self, id: &str) -> Result<Option<Article>, Error>;

    async fn create_article(&self, article: NewArticle) -> Result<Article, Error>;

    /// Removes the article together with every word saved from it.
    /// Returns `false` and leaves both collections untouched when no
    /// article has this id.
    async fn delete_article(&self, id: &str) -> Result<bool, Error>;

    async fn list_dictionary_words(&self) -> Result<Vec<DictionaryWord>, Error>;

    async fn get_dictionary_word(&self, id: &str) -> Result<Option<DictionaryWord>, Error>;

    async fn create_dictionary_word(
        &self,
        word: NewDictionaryWord,
    ) -> Result<DictionaryWord, Error>;

    async fn delete_dictionary_word(&self, id: &str) -> Result<bool, Error>;
}

/// Handle shared by every request.
pub type Store = Arc<dyn Storage>;

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Memory,
    Postgres,
}

/// Builds the store for `backend`. `db_url` is only read for Postgres, and
/// failing to reach it is reported as `Error::StorageUnavailable`.
pub async fn connect(backend: Backend, db_url: &str) -> Result<Store, Error> {
    match backend {
        Backend::Memory => Ok(Arc::new(MemStore::new())),
        Backend::Postgres => Ok(Arc::new(PgStore::new(db_url).await?)),
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn ten_thousand_ids_are_distinct() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn ids_are_safe_path_segments() {
        let id = new_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
    }

    #[tokio::test]
    async fn memory_backend_needs_no_database() {
        let store = connect(Backend::Memory, "").await.unwrap();
        assert!(store.list_articles().await.unwrap().is_empty());
    }

    #[test]
    fn backend_names_are_lowercase() {
        let backend: Backend = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(backend, Backend::Postgres);
        assert!(serde_json::from_str::<Backend>("\"redis\"").is_err());
    }

    proptest! {
        #[test]
        fn batches_of_ids_never_collide(n in 1usize..2_000) {
            let ids: HashSet<String> = (0..n).map(|_| new_id()).collect();
            prop_assert_eq!(ids.len(), n);
        }
    }
}

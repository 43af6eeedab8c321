use std::collections::HashMap;

use async_trait::async_trait;
use handle_errors::Error;
use tokio::sync::RwLock;
use tracing::debug;
use validator::Validate;

use super::{new_id, Storage};
use crate::types::article::{Article, NewArticle};
use crate::types::dictionary::{DictionaryWord, NewDictionaryWord};

#[derive(Default)]
struct Collections {
    articles: HashMap<String, Article>,
    dictionary_words: HashMap<String, DictionaryWord>,
}

/// Process-local store. Both collections sit behind a single lock so a
/// cascading delete is one critical section.
#[derive(Default)]
pub struct MemStore {
    collections: RwLock<Collections>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStore {
    async fn list_articles(&self) -> Result<Vec<Article>, Error> {
        let collections = self.collections.read().await;
        Ok(collections.articles.values().cloned().collect())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>, Error> {
        let collections = self.collections.read().await;
        Ok(collections.articles.get(id).cloned())
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article, Error> {
        article.validate().map_err(Error::InvalidArticle)?;
        let article = article.into_article(new_id());
        let mut collections = self.collections.write().await;
        collections
            .articles
            .insert(article.id.clone(), article.clone());
        Ok(article)
    }

    async fn delete_article(&self, id: &str) -> Result<bool, Error> {
        let mut collections = self.collections.write().await;
        if collections.articles.remove(id).is_none() {
            return Ok(false);
        }
        let before = collections.dictionary_words.len();
        collections
            .dictionary_words
            .retain(|_, word| word.article_id != id);
        debug!(
            article_id = id,
            removed_words = before - collections.dictionary_words.len(),
            "cascade delete"
        );
        Ok(true)
    }

    async fn list_dictionary_words(&self) -> Result<Vec<DictionaryWord>, Error> {
        let collections = self.collections.read().await;
        Ok(collections.dictionary_words.values().cloned().collect())
    }

    async fn get_dictionary_word(&self, id: &str) -> Result<Option<DictionaryWord>, Error> {
        let collections = self.collections.read().await;
        Ok(collections.dictionary_words.get(id).cloned())
    }

    async fn create_dictionary_word(
        &self,
        word: NewDictionaryWord,
    ) -> Result<DictionaryWord, Error> {
        word.validate().map_err(Error::InvalidWord)?;
        let word = word.into_word(new_id());
        let mut collections = self.collections.write().await;
        collections
            .dictionary_words
            .insert(word.id.clone(), word.clone());
        Ok(word)
    }

    async fn delete_dictionary_word(&self, id: &str) -> Result<bool, Error> {
        let mut collections = self.collections.write().await;
        Ok(collections.dictionary_words.remove(id).is_some())
    }
}

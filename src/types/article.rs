use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String, //uuid
    pub title: String,
    pub content: String,
}

/// Body of `POST /api/articles` as sent. Missing fields are reported
/// alongside empty ones instead of failing deserialization.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
pub struct ArticleForm {
    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(required(message = "Content is required"), length(min = 1, message = "Content is required"))]
    pub content: Option<String>,
}

impl ArticleForm {
    pub fn into_new_article(self) -> Result<NewArticle, ValidationErrors> {
        self.validate()?;
        Ok(NewArticle {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        })
    }
}

/// Validated input for `Storage::create_article`.
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct NewArticle {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        NewArticle {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn into_article(self, id: String) -> Article {
        Article {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Longest context sentence kept with a saved word, in characters.
pub const MAX_CONTEXT_CHARS: usize = 200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryWord {
    pub id: String, //uuid
    pub word: String,
    pub translation: String,
    pub context: String,
    pub article_id: String,
}

/// Body of `POST /api/dictionary` as sent. `article_id` is not checked
/// against the stored articles.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryWordForm {
    #[validate(required(message = "Word is required"), length(min = 1, message = "Word is required"))]
    pub word: Option<String>,
    #[validate(required(message = "Translation is required"), length(min = 1, message = "Translation is required"))]
    pub translation: Option<String>,
    #[validate(required(message = "Context is required"), length(max = 200, message = "Context must be at most 200 characters; truncate it before saving"))]
    pub context: Option<String>,
    #[validate(required(message = "Article id is required"), length(min = 1, message = "Article id is required"))]
    pub article_id: Option<String>,
}

impl DictionaryWordForm {
    pub fn into_new_word(self) -> Result<NewDictionaryWord, ValidationErrors> {
        self.validate()?;
        Ok(NewDictionaryWord {
            word: self.word.unwrap_or_default(),
            translation: self.translation.unwrap_or_default(),
            context: self.context.unwrap_or_default(),
            article_id: self.article_id.unwrap_or_default(),
        })
    }
}

/// Validated input for `Storage::create_dictionary_word`.
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDictionaryWord {
    #[validate(length(min = 1, message = "Word is required"))]
    pub word: String,
    #[validate(length(min = 1, message = "Translation is required"))]
    pub translation: String,
    #[validate(length(max = 200, message = "Context must be at most 200 characters; truncate it before saving"))]
    pub context: String,
    #[validate(length(min = 1, message = "Article id is required"))]
    pub article_id: String,
}

impl NewDictionaryWord {
    pub fn into_word(self, id: String) -> DictionaryWord {
        DictionaryWord {
            id,
            word: self.word,
            translation: self.translation,
            context: self.context,
            article_id: self.article_id,
        }
    }
}

/// Cuts a highlighted paragraph down to what fits in `context`.
pub fn truncate_context(paragraph: &str) -> String {
    paragraph.chars().take(MAX_CONTEXT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn katze(context: &str) -> NewDictionaryWord {
        NewDictionaryWord {
            word: "Katze".to_string(),
            translation: "cat".to_string(),
            context: context.to_string(),
            article_id: "A1".to_string(),
        }
    }

    #[test]
    fn wire_format_uses_camel_case_article_id() {
        let json = serde_json::json!({
            "word": "Katze",
            "translation": "cat",
            "context": "Die Katze sitzt.",
            "articleId": "A1",
        });
        let word: NewDictionaryWord = serde_json::from_value(json).unwrap();
        assert_eq!(word.article_id, "A1");

        let stored = serde_json::to_value(word.into_word("W1".to_string())).unwrap();
        assert_eq!(stored["articleId"], "A1");
        assert!(stored.get("article_id").is_none());
    }

    #[test]
    fn missing_context_is_a_field_error() {
        let form: DictionaryWordForm = serde_json::from_value(serde_json::json!({
            "word": "Katze",
            "translation": "cat",
            "articleId": "A1",
        }))
        .unwrap();
        let errors = form.into_new_word().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["context"][0].code, "required");
    }

    #[test]
    fn overlong_context_message_asks_for_truncation() {
        let errors = katze(&"x".repeat(MAX_CONTEXT_CHARS + 1))
            .validate()
            .unwrap_err();
        let message = errors.field_errors()["context"][0].message.clone().unwrap();
        assert!(message.contains("truncate"));
    }

    proptest! {
        #[test]
        fn truncated_paragraphs_always_pass_the_form(paragraph in "\\PC{0,400}") {
            let form = DictionaryWordForm {
                word: Some("Katze".to_string()),
                translation: Some("cat".to_string()),
                context: Some(truncate_context(&paragraph)),
                article_id: Some("A1".to_string()),
            };
            let word = form.into_new_word().unwrap();
            prop_assert!(word.context.chars().count() <= MAX_CONTEXT_CHARS);
            prop_assert!(paragraph.starts_with(&word.context));
        }
    }

    #[test]
    fn empty_context_is_allowed() {
        assert!(katze("").validate().is_ok());
    }

    #[test]
    fn context_limit_counts_characters_not_bytes() {
        let umlauts = "ä".repeat(MAX_CONTEXT_CHARS);
        assert!(umlauts.len() > MAX_CONTEXT_CHARS);
        assert!(katze(&umlauts).validate().is_ok());

        let too_long = "ä".repeat(MAX_CONTEXT_CHARS + 1);
        let errors = katze(&too_long).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("context"));
    }

    #[test]
    fn truncated_context_always_validates() {
        let paragraph = "Die Katze sitzt auf der Matte. ".repeat(20);
        let context = truncate_context(&paragraph);
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
        assert!(katze(&context).validate().is_ok());
        assert_eq!(truncate_context("kurz"), "kurz");
    }

    #[test]
    fn missing_word_and_translation_are_both_reported() {
        let mut word = katze("Die Katze sitzt.");
        word.word.clear();
        word.translation.clear();
        let errors = word.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("word"));
        assert!(fields.contains_key("translation"));
    }
}

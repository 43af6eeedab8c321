pub mod article;
pub mod dictionary;

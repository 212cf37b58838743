use serde::Deserialize;

use super::repo_types::ArticleInput;
use crate::{error::ApiError, nullable};

/// Admin create/update body. `category_id` of `0` or less means "no category".
#[derive(Debug, Deserialize)]
pub struct ArticlePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source: String,
}

impl ArticlePayload {
    pub fn into_input(self) -> Result<ArticleInput, ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::bad_input("Article title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(ApiError::bad_input("Article content is required"));
        }
        Ok(ArticleInput {
            title: self.title,
            content: self.content,
            category_id: nullable::from_payload(self.category_id),
            author: self.author,
            source: self.source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_category_becomes_absent() {
        let p: ArticlePayload =
            serde_json::from_str(r#"{"title":"T","content":"C","category_id":0}"#).unwrap();
        assert_eq!(p.into_input().unwrap().category_id, None);
    }

    #[test]
    fn positive_category_is_kept() {
        let p: ArticlePayload =
            serde_json::from_str(r#"{"title":"T","content":"C","category_id":12}"#).unwrap();
        assert_eq!(p.into_input().unwrap().category_id, Some(12));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let p: ArticlePayload = serde_json::from_str(r#"{"title":"T","content":"C"}"#).unwrap();
        let input = p.into_input().unwrap();
        assert_eq!(input.author, "");
        assert_eq!(input.source, "");
        assert_eq!(input.category_id, None);
    }

    #[test]
    fn title_and_content_are_required() {
        let p: ArticlePayload = serde_json::from_str(r#"{"content":"C"}"#).unwrap();
        assert!(p.into_input().is_err());
        let p: ArticlePayload = serde_json::from_str(r#"{"title":"T","content":" "}"#).unwrap();
        assert!(p.into_input().is_err());
    }
}

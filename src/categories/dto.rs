use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::repo_types::{Category, CategoryInput};
use crate::{articles::repo_types::Article, error::ApiError, nullable, pagination::Paginated};

/// Admin create/update body. `parent_id` of `0` or less means "no parent".
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

pub(crate) fn is_valid_slug(slug: &str) -> bool {
    lazy_static! {
        static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    }
    SLUG_RE.is_match(slug)
}

impl CategoryPayload {
    pub fn into_input(self) -> Result<CategoryInput, ApiError> {
        let name = self.name.trim().to_string();
        let slug = self.slug.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::bad_input("Category name is required"));
        }
        if slug.is_empty() {
            return Err(ApiError::bad_input("Category slug is required"));
        }
        if !is_valid_slug(&slug) {
            return Err(ApiError::bad_input(
                "Category slug may only contain lowercase letters, digits and single hyphens",
            ));
        }
        Ok(CategoryInput {
            name,
            slug,
            description: self.description,
            parent_id: nullable::from_payload(self.parent_id),
        })
    }
}

/// Public `/categories/{slug}` body: the category and one page of its articles.
#[derive(Debug, Serialize)]
pub struct CategoryArticles {
    pub category: Category,
    pub articles: Paginated<Article>,
}

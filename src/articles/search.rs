//! Full-text search over the stored `content_tsv` vector.
//!
//! The page query and the count query share one predicate. Rows with equal
//! rank come back in whatever order the store produces; that order is not
//! stable across calls.

use serde::Deserialize;

use crate::error::ApiError;

// `$1` is the raw search string. The `simple` configuration matches the one
// the `content_tsv` column is generated with.
macro_rules! match_predicate {
    () => {
        "content_tsv @@ plainto_tsquery('simple', $1)"
    };
}

pub(crate) const SEARCH_PAGE_SQL: &str = concat!(
    "SELECT id, title, content, category_id, author, source, created_at, updated_at ",
    "FROM articles WHERE ",
    match_predicate!(),
    " ORDER BY ts_rank(content_tsv, plainto_tsquery('simple', $1)) DESC",
    " LIMIT $2 OFFSET $3"
);

pub(crate) const SEARCH_COUNT_SQL: &str =
    concat!("SELECT COUNT(*) FROM articles WHERE ", match_predicate!());

/// `GET /search` query string.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A validated, non-empty search string, handed to `plainto_tsquery`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw.map(str::trim) {
            Some(term) if !term.is_empty() => Ok(Self(term.to_string())),
            _ => Err(ApiError::bad_input("Search query cannot be empty")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_queries_are_rejected() {
        assert!(SearchTerm::parse(None).is_err());
        assert!(SearchTerm::parse(Some("")).is_err());
        assert!(SearchTerm::parse(Some("   ")).is_err());
    }

    #[test]
    fn page_and_count_share_the_predicate() {
        let predicate = match_predicate!();
        assert!(SEARCH_PAGE_SQL.contains(predicate));
        assert!(SEARCH_COUNT_SQL.ends_with(predicate));
        assert!(SEARCH_PAGE_SQL.contains("ORDER BY ts_rank"));
    }

    #[test]
    fn terms_are_trimmed() {
        let term = SearchTerm::parse(Some("  rust async ")).unwrap();
        assert_eq!(term.as_str(), "rust async");
    }
}

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod search;

pub use repo_types::{Article, ArticleInput};
pub use search::SearchTerm;

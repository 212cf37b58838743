use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{
    dto::ArticlePayload,
    repo_types::Article,
    search::{SearchQuery, SearchTerm},
};
use crate::{
    error::{parse_id, ApiError, StoreResultExt},
    extract::ApiJson,
    pagination::{PageParams, PageQuery, Paginated},
    state::AppState,
};

const INVALID_ID: &str = "Invalid article ID";
const NOT_FOUND: &str = "Article not found";

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_articles))
        .route("/articles", get(list_articles))
        .route("/articles/:id", get(get_article))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", post(create_article).get(list_articles))
        .route("/articles/:id", put(update_article).delete(delete_article))
}

#[instrument(skip(state))]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Paginated<Article>>, ApiError> {
    let params = PageParams::from(&q);
    let page = Article::list(&state.db, params)
        .await
        .or_store_failure("Failed to retrieve articles")?;
    Ok(Json(Paginated::from_page(page, params)))
}

#[instrument(skip(state))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let article = Article::get(&state.db, id)
        .await
        .or_not_found(NOT_FOUND, "Failed to retrieve article")?;
    Ok(Json(article))
}

#[instrument(skip(state))]
pub async fn search_articles(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Paginated<Article>>, ApiError> {
    let term = SearchTerm::parse(q.q.as_deref())?;
    let params = PageParams::normalize(q.page.as_deref(), q.limit.as_deref());
    let page = Article::search(&state.db, &term, params)
        .await
        .or_store_failure("Failed to perform search")?;
    Ok(Json(Paginated::from_page(page, params)))
}

#[instrument(skip(state, payload))]
pub async fn create_article(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ArticlePayload>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let input = payload.into_input()?;
    let id = Article::create(&state.db, &input)
        .await
        .or_store_failure("Failed to create article")?;
    let created = Article::get(&state.db, id)
        .await
        .or_store_failure("Failed to retrieve created article")?;
    info!(article_id = id, "article created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, payload))]
pub async fn update_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(payload): ApiJson<ArticlePayload>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let input = payload.into_input()?;
    let updated = Article::update(&state.db, id, &input)
        .await
        .or_store_failure("Failed to update article")?;
    if !updated {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!(article_id = id, "article updated");
    Ok(Json(json!({ "message": "Article updated successfully" })))
}

#[instrument(skip(state))]
pub async fn delete_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    Article::delete(&state.db, id)
        .await
        .or_store_failure("Failed to delete article")?;
    info!(article_id = id, "article deleted");
    Ok(Json(json!({ "message": "Article deleted successfully" })))
}

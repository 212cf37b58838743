use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{
    dto::{CategoryArticles, CategoryPayload},
    repo_types::Category,
};
use crate::{
    articles::repo_types::Article,
    error::{parse_id, ApiError, StoreResultExt},
    extract::ApiJson,
    pagination::{PageParams, PageQuery, Paginated},
    state::AppState,
};

const INVALID_ID: &str = "Invalid category ID";
const NOT_FOUND: &str = "Category not found";

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:slug", get(category_with_articles))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = Category::list(&state.db)
        .await
        .or_store_failure("Failed to retrieve categories")?;
    Ok(Json(categories))
}

#[instrument(skip(state))]
pub async fn category_with_articles(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<PageQuery>,
) -> Result<Json<CategoryArticles>, ApiError> {
    let category = Category::get_by_slug(&state.db, &slug)
        .await
        .or_not_found(NOT_FOUND, "Failed to find category")?;

    let params = PageParams::from(&q);
    let page = Article::list_by_category(&state.db, category.id, params)
        .await
        .or_store_failure("Failed to retrieve articles for this category")?;

    Ok(Json(CategoryArticles {
        category,
        articles: Paginated::from_page(page, params),
    }))
}

#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let category = Category::get_by_id(&state.db, id)
        .await
        .or_not_found(NOT_FOUND, "Failed to retrieve category")?;
    Ok(Json(category))
}

#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let input = payload.into_input()?;
    let id = Category::create(&state.db, &input)
        .await
        .or_store_failure("Failed to create category")?;
    let created = Category::get_by_id(&state.db, id)
        .await
        .or_store_failure("Failed to retrieve created category")?;
    info!(category_id = id, slug = %created.slug, "category created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let input = payload.into_input()?;
    let updated = Category::update(&state.db, id, &input)
        .await
        .or_store_failure("Failed to update category")?;
    if !updated {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!(category_id = id, "category updated");
    Ok(Json(json!({ "message": "Category updated successfully" })))
}

#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    Category::delete(&state.db, id)
        .await
        .or_store_failure("Failed to delete category")?;
    info!(category_id = id, "category deleted");
    Ok(Json(json!({ "message": "Category deleted successfully" })))
}

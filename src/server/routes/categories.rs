use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::get_all_categories;
use crate::db::queries::questions::get_questions_for_category;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

/// Category listing keyed by id, the shape every listing response embeds.
pub(super) async fn category_map(pool: &SqlitePool) -> Result<BTreeMap<i64, String>, ApiError> {
    let categories = get_all_categories(pool).await?;
    Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesResponse> {
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&pool).await?,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<CategoryQuestionsResponse> {
    // category keys are 32-bit in the store; a wider id cannot name a row
    let id = i64::from(i32::try_from(id).map_err(|_| ApiError::NotFound)?);

    // an unknown-but-representable category is not an error, just empty
    let questions = get_questions_for_category(&pool, id).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}

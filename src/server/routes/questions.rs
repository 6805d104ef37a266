use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions::{
    count_questions, create_question, delete_question, get_question_by_id, get_questions_page,
    search_questions,
};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::telemetry;

use super::categories::category_map;

const PAGE_SIZE: i64 = 10;

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    created: i64,
    questions: Vec<Question>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn first_page(pool: &SqlitePool) -> Result<Vec<Question>, ApiError> {
    Ok(get_questions_page(pool, PAGE_SIZE, 0).await?)
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResult<QuestionListResponse> {
    let page = page.unwrap_or(1);
    let offset = i64::from(page.saturating_sub(1)) * PAGE_SIZE;

    // an empty slice is reported as an error, not an empty list
    let questions = get_questions_page(&pool, PAGE_SIZE, offset).await?;
    if questions.is_empty() {
        return Err(ApiError::EmptyPage);
    }

    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: count_questions(&pool).await?,
        categories: category_map(&pool).await?,
        questions,
    }))
}

async fn remove_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<DeletedResponse> {
    let Some(question) = get_question_by_id(&pool, id).await? else {
        return Err(ApiError::Unprocessable);
    };
    delete_question(&pool, question.id).await?;
    telemetry::QUESTIONS_DELETED.inc();

    Ok(Json(DeletedResponse {
        success: true,
        deleted: question.id,
        questions: first_page(&pool).await?,
        total_questions: count_questions(&pool).await?,
    }))
}

async fn add_question(
    State(pool): State<SqlitePool>,
    Json(new_question): Json<NewQuestion>,
) -> ApiResult<CreatedResponse> {
    let id = create_question(
        &pool,
        &new_question.question,
        &new_question.answer,
        new_question.category,
        new_question.difficulty,
    )
    .await?;
    telemetry::QUESTIONS_CREATED.inc();

    Ok(Json(CreatedResponse {
        success: true,
        created: id,
        questions: first_page(&pool).await?,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    Json(body): Json<SearchBody>,
) -> ApiResult<SearchResponse> {
    let term = body
        .search_term
        .filter(|term| !term.is_empty())
        .ok_or(ApiError::BadRequest)?;

    // no match is still a success, just an empty list
    let questions = search_questions(&pool, &term).await?;
    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(add_question))
        .route("/questions/{id}", delete(remove_question))
        .route("/questions/search", post(search))
        .with_state(state)
}

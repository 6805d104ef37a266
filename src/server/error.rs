use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// Paginating past the end of the data. Reported as a 400 carrying the
    /// not-found message; clients depend on that exact combination.
    EmptyPage,
    NotFound,
    BadRequest,
    Unprocessable,
    Database(sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::EmptyPage => (StatusCode::BAD_REQUEST, "resource not found"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "resource not found"),
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request"),
            // the misspelling is part of the public contract
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, "Unproccesable"),
            ApiError::Database(error) => {
                tracing::error!(%error, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };
        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        ApiError::Database(error)
    }
}

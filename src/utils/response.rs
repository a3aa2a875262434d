use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::validation::FieldError;

/// Body of every failed request.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

pub fn success<T>(data: T) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::OK, Json(data))
}

pub fn created<T>(data: T) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::CREATED, Json(data))
}

pub fn error(
    code: &str,
    detail: impl Into<String>,
    errors: Option<Vec<FieldError>>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorBody {
        detail: detail.into(),
        code: code.to_string(),
        errors,
    };

    (status, Json(body)).into_response()
}

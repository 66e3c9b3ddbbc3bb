//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of a successful mutation: `{success, message}` plus the affected record when there is one.
#[derive(Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

pub fn outcome<T: Serialize>(message: &'static str, data: T) -> (StatusCode, Json<Outcome<T>>) {
    (
        StatusCode::OK,
        Json(Outcome {
            success: true,
            message,
            data: Some(data),
        }),
    )
}

pub fn outcome_empty(message: &'static str) -> (StatusCode, Json<Outcome<()>>) {
    (
        StatusCode::OK,
        Json(Outcome {
            success: true,
            message,
            data: None,
        }),
    )
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}

//! Registro handlers: list, create, read, update, delete.

use crate::domain::RegistroInput;
use crate::error::AppError;
use crate::response::{outcome, outcome_empty, success_many};
use crate::service::{RegistroService, RegistroValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("Identificador inválido".into()))
}

fn body_to_input(value: Value) -> Result<RegistroInput, AppError> {
    if !value.is_object() {
        return Err(AppError::BadRequest("El cuerpo debe ser un objeto JSON".into()));
    }
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Cuerpo inválido: {}", e)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /registros: all records, newest first.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = RegistroService::get_all(&state.pool).await?;
    Ok(success_many(rows))
}

/// POST /registros
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let input = body_to_input(body)?;
    let new = RegistroValidator::validate(&input, today()).map_err(AppError::Validation)?;
    let row = RegistroService::insert(&state.pool, &new).await?;
    tracing::info!(id = row.id, dni = %row.dni, "registro created");
    Ok(outcome("Registro creado exitosamente", row))
}

/// GET /registros/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = RegistroService::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(AppError::registro_not_found)?;
    Ok(Json(row))
}

/// PUT /registros/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let Json(body) = payload?;
    let input = body_to_input(body)?;
    let new = RegistroValidator::validate(&input, today()).map_err(AppError::Validation)?;
    let row = RegistroService::update(&state.pool, id, &new)
        .await?
        .ok_or_else(AppError::registro_not_found)?;
    tracing::info!(id = row.id, "registro updated");
    Ok(outcome("Registro actualizado exitosamente", row))
}

/// DELETE /registros/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !RegistroService::delete(&state.pool, id).await? {
        return Err(AppError::registro_not_found());
    }
    tracing::info!(id, "registro deleted");
    Ok(outcome_empty("Registro eliminado exitosamente"))
}

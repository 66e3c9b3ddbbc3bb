//! Service status: liveness, readiness against the record store, build info.

use crate::service::RegistroService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Ok,
    Degraded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum StoreState {
    Ok,
    Unavailable,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<StoreState>,
    /// Stored record count, only when the store answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    registros: Option<i64>,
}

#[derive(Debug, Serialize)]
struct BuildInfo {
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<StatusReport> {
    Json(StatusReport {
        status: Status::Ok,
        database: None,
        registros: None,
    })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusReport>) {
    match RegistroService::count(&state.pool).await {
        Ok(n) => (
            StatusCode::OK,
            Json(StatusReport {
                status: Status::Ok,
                database: Some(StoreState::Ok),
                registros: Some(n),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "registros store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusReport {
                    status: Status::Degraded,
                    database: Some(StoreState::Unavailable),
                    registros: None,
                }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health, GET /ready, GET /version.
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_report_omits_count() {
        let v = serde_json::to_value(StatusReport {
            status: Status::Degraded,
            database: Some(StoreState::Unavailable),
            registros: None,
        })
        .unwrap();
        assert_eq!(v, serde_json::json!({"status": "degraded", "database": "unavailable"}));
    }
}

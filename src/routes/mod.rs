//! Router assembly.

mod registro;
mod status;

pub use registro::registro_routes;
pub use status::status_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

/// Form submissions are a handful of short strings.
pub const MAX_REQUEST_PAYLOAD_BYTES: usize = 64 * 1024;

/// Full application: page, registro API, health routes, static files as fallback.
pub fn app(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();
    Router::new()
        .merge(status_routes(state.clone()))
        .merge(registro_routes(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_PAYLOAD_BYTES)),
        )
}

//! Registro routes: the JSON CRUD surface under /registros and the rendered page at /.

use crate::handlers::page::index;
use crate::handlers::registro::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn registro_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/registros", get(list).post(create))
        .route("/registros/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}

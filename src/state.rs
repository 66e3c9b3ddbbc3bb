//! Shared application state for all routes.

use sqlx::SqlitePool;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    /// Opened once at startup; the only process-wide shared resource.
    pub pool: SqlitePool,
    pub static_dir: PathBuf,
}

//! Runtime settings for the registration server.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:registros.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// SQLite connection URL; the file is created on startup when missing.
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Directory served as the router fallback (stylesheets, scripts).
    pub static_dir: PathBuf,
    pub max_connections: u32,
}

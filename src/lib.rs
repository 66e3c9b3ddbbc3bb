//! Registros: citizen registration REST backend over SQLite.

pub mod config;
pub mod domain;
pub mod error;
pub mod response;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::Settings;
pub use domain::{City, Gender, NewRegistro, Registro, RegistroInput};
pub use error::{AppError, SettingsError};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
pub use routes::{app, status_routes, registro_routes};
pub use service::{RegistroService, RegistroValidator};

//! Registros server: opens the SQLite store, ensures the schema, and serves the page and REST API.
//!
//! Run from repo root: `cargo run -p registros-server`
//! Settings come from the environment (or a `.env` file): DATABASE_URL, BIND_ADDR, STATIC_DIR, DB_MAX_CONNECTIONS.

use registros::{app, connect, ensure_database_exists, ensure_tables, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("registros=info,registros_server=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    ensure_tables(&pool).await?;
    tracing::info!(database = %settings.database_url, "registros table ready");

    let state = AppState {
        pool,
        static_dir: settings.static_dir.clone(),
    };

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("registros listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

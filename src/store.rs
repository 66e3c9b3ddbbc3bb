//! SQLite bootstrap: database file creation, pool construction and the `registros` table DDL.

use crate::config::Settings;
use crate::error::AppError;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool};

/// Table DDL. `dni` carries the uniqueness constraint the service relies on for conflict detection.
const REGISTROS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS registros (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        dni TEXT UNIQUE NOT NULL,
        nombres TEXT NOT NULL,
        apellidos TEXT NOT NULL,
        fechaNacimiento TEXT NOT NULL,
        genero TEXT NOT NULL,
        ciudad TEXT NOT NULL,
        fechaCreacion DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create the SQLite database file if it does not exist yet. In-memory URLs are left alone.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    if is_in_memory(database_url) {
        return Ok(());
    }
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!(url = %database_url, "creating database");
        Sqlite::create_database(database_url).await?;
    }
    Ok(())
}

/// Open the pool that lives for the whole process.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Create the `registros` table if missing. Idempotent.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(REGISTROS_DDL).execute(pool).await?;
    tracing::debug!("registros table ready");
    Ok(())
}

/// Single-connection in-memory pool with the schema applied. The connection is never
/// recycled, so the database survives for the pool's lifetime.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_tables(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_detected() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:memdb_1?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:registros.db"));
    }

    #[tokio::test]
    async fn ensure_tables_is_idempotent() {
        let pool = test_pool().await;
        ensure_tables(&pool).await.unwrap();
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registros")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn creates_database_file() {
        let path = std::env::temp_dir().join(format!("registros-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}", path.display());
        ensure_database_exists(&url).await.unwrap();
        assert!(path.exists());
        ensure_database_exists(&url).await.unwrap();
        let _ = std::fs::remove_file(&path);
    }
}

//! SQLite connection management for the credential store.

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

/// File name of the credential database inside the data directory.
const DEFAULT_DB_FILE: &str = "auth.db";

/// Errors that can occur while opening the store.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// Default location of the credential database: `$DATA_DIR/cliui/auth.db`.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cliui")
        .join(DEFAULT_DB_FILE)
}

/// Open (creating if needed) the database file and apply the schema.
pub async fn connect(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true),
        )
        .await?;

    crate::migrate::migrate(&pool).await?;
    info!(path = %db_path.display(), "credential store ready");
    Ok(pool)
}

/// Open a fresh in-memory database with the full schema.
///
/// Limited to a single connection: every `sqlite::memory:` connection is
/// its own database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    crate::migrate::migrate(&pool).await?;
    Ok(pool)
}

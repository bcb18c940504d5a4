use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tinyurl_core::repository::{ReadRepository, Repository, Result};
use tinyurl_core::{ShortCode, StorageError};
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../ddl/sqlite/urls.sql");

/// SQLite implementation of the repository contract.
///
/// All mappings live in a single `urls` table keyed by `short_hash`.
/// `full_url` carries no unique index; de-duplication is the link
/// service's job.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    short_hash: String,
    full_url: String,
}

impl SqliteRepository {
    /// Creates a repository from an existing pool.
    ///
    /// The schema is assumed to exist; use [`SqliteRepository::open`] or
    /// [`SqliteRepository::connect`] to have it created.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database file at `path` and ensures
    /// the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::Initialization(format!(
                    "failed to create directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        info!(path = %path.display(), "opening sqlite database");
        Self::connect_with(options).await
    }

    /// Connects using a sqlx sqlite URL (e.g. `sqlite://tinyurl.db?mode=rwc`)
    /// and ensures the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StorageError::Initialization(e.to_string()))?;
        Self::connect_with(options).await
    }

    async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        if let Err(err) = repository.ensure_schema().await {
            // The pool is not handed out on failure, release it here.
            repository.pool.close().await;
            return Err(err);
        }

        Ok(repository)
    }

    /// Creates the `urls` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Initialization(format!("failed to create table: {e}")))?;
        debug!("sqlite schema ready");
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let row = sqlx::query("SELECT full_url FROM urls WHERE short_hash = ? LIMIT 1")
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|row| row.try_get::<String, _>("full_url").map_err(map_sqlx_error))
            .transpose()
    }

    async fn find_by_url(&self, full_url: &str) -> Result<Option<ShortCode>> {
        let row = sqlx::query("SELECT short_hash FROM urls WHERE full_url = ? LIMIT 1")
            .bind(full_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|row| {
            row.try_get::<String, _>("short_hash")
                .map(ShortCode::new_unchecked)
                .map_err(map_sqlx_error)
        })
        .transpose()
    }

    async fn list(&self) -> Result<HashMap<String, ShortCode>> {
        let rows: Vec<UrlRow> = sqlx::query_as("SELECT short_hash, full_url FROM urls")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.full_url, ShortCode::new_unchecked(row.short_hash)))
            .collect())
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, code: &ShortCode, full_url: &str) -> Result<()> {
        let result = sqlx::query("INSERT INTO urls (short_hash, full_url) VALUES (?, ?)")
            .bind(code.as_str())
            .bind(full_url)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            info!("closing sqlite pool");
            self.pool.close().await;
        }
    }
}

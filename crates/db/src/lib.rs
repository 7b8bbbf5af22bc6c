//! SQLite content store: numerology interpretations, dream symbols and oracle
//! messages, seeded by the embedded migrations.

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use thiserror::Error;
use tracing::info;

pub mod models;

#[derive(Debug, Error)]
pub enum DBError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] MigrateError),
}

/// An in-memory database only lives as long as its connection, so those
/// pools hold exactly one connection that is never retired.
fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    if in_memory {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    }
}

#[derive(Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    /// Open the pool at `database_url` and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DBError> {
        let in_memory = database_url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = pool_options(in_memory).connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        info!(database_url = %database_url, "Content database ready");

        Ok(Self { pool })
    }

    /// Fresh in-memory store with schema and seed content, for tests.
    pub async fn in_memory() -> Result<Self, DBError> {
        Self::connect("sqlite::memory:").await
    }
}

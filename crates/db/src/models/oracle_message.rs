use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;

/// One card of the daily oracle
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct OracleMessage {
    #[ts(type = "number")]
    pub id: i64,
    pub theme: String,
    pub message: String,
}

impl OracleMessage {
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM oracle_messages")
            .fetch_one(pool)
            .await
    }

    /// The message at position `index` in id order
    pub async fn find_nth(pool: &SqlitePool, index: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, OracleMessage>(
            r#"SELECT id, theme, message
               FROM oracle_messages
               ORDER BY id ASC
               LIMIT 1 OFFSET $1"#,
        )
        .bind(index)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, theme: &str, message: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, OracleMessage>(
            r#"INSERT INTO oracle_messages (theme, message)
               VALUES ($1, $2)
               RETURNING id, theme, message"#,
        )
        .bind(theme)
        .bind(message)
        .fetch_one(pool)
        .await
    }
}

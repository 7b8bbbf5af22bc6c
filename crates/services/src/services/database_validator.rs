//! Startup check that the content database is migrated and populated

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

pub const CONTENT_TABLES: [&str; 3] = ["number_interpretations", "dream_symbols", "oracle_messages"];

#[derive(Debug, Error)]
pub enum DatabaseValidationError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct DatabaseValidator {
    pool: SqlitePool,
}

impl DatabaseValidator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn validate(&self) -> Result<ValidationResult, DatabaseValidationError> {
        let migrations_table_exists = self.table_exists("_sqlx_migrations").await?;

        if !migrations_table_exists {
            warn!("Content database not initialized - _sqlx_migrations table does not exist");
            return Ok(ValidationResult {
                is_initialized: false,
                migrations_applied: 0,
                missing_tables: CONTENT_TABLES.iter().map(|t| t.to_string()).collect(),
                empty_tables: vec![],
            });
        }

        let migrations_applied =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
                .fetch_one(&self.pool)
                .await?;

        let missing_tables = self.missing_tables(&CONTENT_TABLES).await?;

        let mut empty_tables = Vec::new();
        for table in CONTENT_TABLES.iter().filter(|t| !missing_tables.iter().any(|m| m == *t)) {
            // Table names come from CONTENT_TABLES, never from input
            let rows = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await?;
            if rows == 0 {
                empty_tables.push(table.to_string());
            }
        }

        let result = ValidationResult {
            is_initialized: true,
            migrations_applied: migrations_applied as usize,
            missing_tables,
            empty_tables,
        };

        if result.is_ok() {
            info!(migrations_applied = result.migrations_applied, "Content database validated");
        } else {
            warn!("{}", result.summary());
        }

        Ok(result)
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DatabaseValidationError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn missing_tables(&self, required: &[&str]) -> Result<Vec<String>, DatabaseValidationError> {
        let mut missing = Vec::new();
        for table in required {
            if !self.table_exists(table).await? {
                missing.push(table.to_string());
            }
        }
        Ok(missing)
    }

    pub async fn latest_migration(&self) -> Result<Option<String>, DatabaseValidationError> {
        let migration = sqlx::query_scalar::<_, String>(
            "SELECT description FROM _sqlx_migrations WHERE success = 1 ORDER BY version DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(migration)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_initialized: bool,
    pub migrations_applied: usize,
    pub missing_tables: Vec<String>,
    pub empty_tables: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.is_initialized && self.missing_tables.is_empty() && self.empty_tables.is_empty()
    }

    pub fn summary(&self) -> String {
        if !self.is_initialized {
            "Content database not initialized - migrations need to be run".to_string()
        } else if !self.missing_tables.is_empty() {
            format!("Missing content tables: {}", self.missing_tables.join(", "))
        } else if !self.empty_tables.is_empty() {
            format!("Content tables without rows: {}", self.empty_tables.join(", "))
        } else {
            format!("Content database OK - {} migrations applied", self.migrations_applied)
        }
    }
}

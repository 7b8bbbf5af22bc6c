//! Dream dictionary lookups over the content store.

use db::models::dream_symbol::DreamSymbol;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;
use utils::text::{fold_diacritic, slugify};

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const MAX_SEARCH_LIMIT: i64 = 50;
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Error)]
pub enum DreamDictionaryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("dream symbol not found: {0}")]
    NotFound(String),
    #[error("invalid letter: {0:?}")]
    InvalidLetter(String),
    #[error("search query must have at least 2 characters")]
    QueryTooShort,
}

#[derive(Clone)]
pub struct DreamDictionary {
    pool: SqlitePool,
}

impl DreamDictionary {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a symbol by slug. Names are accepted too ("Șarpe" finds "sarpe").
    pub async fn get(&self, slug_or_name: &str) -> Result<DreamSymbol, DreamDictionaryError> {
        let slug = slugify(slug_or_name);
        DreamSymbol::find_by_slug(&self.pool, &slug)
            .await?
            .ok_or(DreamDictionaryError::NotFound(slug))
    }

    pub async fn by_letter(&self, letter: &str) -> Result<Vec<DreamSymbol>, DreamDictionaryError> {
        let mut chars = letter.trim().chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(DreamDictionaryError::InvalidLetter(letter.to_string()));
        };
        if !c.is_alphabetic() {
            return Err(DreamDictionaryError::InvalidLetter(letter.to_string()));
        }

        let letter = fold_diacritic(c).to_uppercase().to_string();
        Ok(DreamSymbol::find_by_letter(&self.pool, &letter).await?)
    }

    pub async fn search(
        &self,
        query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<DreamSymbol>, DreamDictionaryError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err(DreamDictionaryError::QueryTooShort);
        }
        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        let results = DreamSymbol::search(&self.pool, query, limit).await?;
        debug!(query = %query, limit, found = results.len(), "Dream search");
        Ok(results)
    }
}

//! Numerology results paired with their pre-written interpretation text.

use std::time::Duration;

use chrono::NaiveDate;
use db::models::interpretation::{InterpretationCategory, NumberInterpretation};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;
use ts_rs::TS;

use super::{
    daily_content::calculate_daily_number,
    numerology::{
        LifePath, NameNumbers, NumerologyError, calculate_life_path, calculate_name_numbers,
        is_master_number, validate_birth_date,
    },
};

const CACHE_CAPACITY: u64 = 512;

#[derive(Debug, Error)]
pub enum InterpretationError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Numerology(#[from] NumerologyError),
    #[error("no interpretation for {category} number {number}")]
    NotFound {
        category: InterpretationCategory,
        number: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LifePathReport {
    pub life_path: LifePath,
    pub interpretation: Option<NumberInterpretation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct NameReport {
    pub numbers: NameNumbers,
    pub destiny: Option<NumberInterpretation>,
    pub soul_urge: Option<NumberInterpretation>,
    pub personality: Option<NumberInterpretation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DailyNumberReport {
    pub date: NaiveDate,
    pub number: u32,
    pub is_master: bool,
    pub interpretation: Option<NumberInterpretation>,
}

/// Read-through cache over the interpretation table. Misses are cached too,
/// so numbers without text (e.g. a soul urge of 0) don't hit the database
/// on every request.
#[derive(Clone)]
pub struct InterpretationService {
    pool: SqlitePool,
    cache: Cache<(InterpretationCategory, u32), Option<NumberInterpretation>>,
}

impl InterpretationService {
    pub fn new(pool: SqlitePool, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();
        Self { pool, cache }
    }

    pub async fn get(
        &self,
        category: InterpretationCategory,
        number: u32,
    ) -> Result<Option<NumberInterpretation>, InterpretationError> {
        let key = (category, number);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(category = %category, number, "Interpretation cache hit");
            return Ok(cached);
        }

        let found = NumberInterpretation::find(&self.pool, category, i64::from(number)).await?;
        self.cache.insert(key, found.clone()).await;
        Ok(found)
    }

    pub async fn require(
        &self,
        category: InterpretationCategory,
        number: u32,
    ) -> Result<NumberInterpretation, InterpretationError> {
        self.get(category, number)
            .await?
            .ok_or(InterpretationError::NotFound { category, number })
    }

    pub async fn list(
        &self,
        category: InterpretationCategory,
    ) -> Result<Vec<NumberInterpretation>, InterpretationError> {
        Ok(NumberInterpretation::find_by_category(&self.pool, category).await?)
    }

    /// Drop every cached entry, e.g. after content was edited
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub async fn life_path_report(
        &self,
        birth_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<LifePathReport, InterpretationError> {
        validate_birth_date(birth_date, today)?;
        let life_path = calculate_life_path(birth_date);
        let interpretation = self
            .get(InterpretationCategory::LifePath, life_path.number)
            .await?;

        Ok(LifePathReport {
            life_path,
            interpretation,
        })
    }

    pub async fn name_report(&self, name: &str) -> Result<NameReport, InterpretationError> {
        let numbers = calculate_name_numbers(name)?;

        Ok(NameReport {
            destiny: self
                .get(InterpretationCategory::Destiny, numbers.destiny)
                .await?,
            soul_urge: self
                .get(InterpretationCategory::SoulUrge, numbers.soul_urge)
                .await?,
            personality: self
                .get(InterpretationCategory::Personality, numbers.personality)
                .await?,
            numbers,
        })
    }

    pub async fn daily_report(&self, date: NaiveDate) -> Result<DailyNumberReport, InterpretationError> {
        let number = calculate_daily_number(date);

        Ok(DailyNumberReport {
            date,
            number,
            is_master: is_master_number(number),
            interpretation: self.get(InterpretationCategory::Daily, number).await?,
        })
    }
}

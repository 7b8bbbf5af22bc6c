//! "Today's" content: the universal day number, personal cycles, and the
//! dream symbol and oracle card picked deterministically from the date.

use chrono::{Datelike, NaiveDate};
use db::models::{
    dream_symbol::DreamSymbol,
    interpretation::{InterpretationCategory, NumberInterpretation},
    oracle_message::OracleMessage,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;
use ts_rs::TS;

use super::{
    interpretations::{InterpretationError, InterpretationService},
    moon_phase::{MoonInfo, MoonPhaseError, moon_phase_for_date},
    numerology::{
        NumerologyError, digit_sum, is_master_number, reduce_to_single_digit, validate_birth_date,
    },
};

const DJB2_SEED: i32 = 5381;

#[derive(Debug, Error)]
pub enum DailyContentError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),
    #[error(transparent)]
    Numerology(#[from] NumerologyError),
    #[error(transparent)]
    MoonPhase(#[from] MoonPhaseError),
    #[error("no {0} available")]
    NoContent(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PersonalCycles {
    pub date: NaiveDate,
    pub personal_year: u32,
    pub personal_month: u32,
    pub personal_day: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct PersonalDayReport {
    pub cycles: PersonalCycles,
    pub interpretation: Option<NumberInterpretation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DailyDream {
    pub date: NaiveDate,
    pub symbol: DreamSymbol,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DailyEnergy {
    pub date: NaiveDate,
    pub number: u32,
    pub is_master: bool,
    pub interpretation: Option<NumberInterpretation>,
    pub moon: MoonInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DailyOracle {
    pub date: NaiveDate,
    pub message: OracleMessage,
}

/// Universal day number: all digits of YYYYMMDD summed, then reduced
pub fn calculate_daily_number(date: NaiveDate) -> u32 {
    let total = digit_sum(date.year().unsigned_abs()) + digit_sum(date.month()) + digit_sum(date.day());
    reduce_to_single_digit(total)
}

pub fn personal_year(birth: NaiveDate, year: i32) -> u32 {
    reduce_to_single_digit(
        reduce_to_single_digit(birth.month())
            + reduce_to_single_digit(birth.day())
            + reduce_to_single_digit(year.unsigned_abs()),
    )
}

pub fn personal_cycles(birth: NaiveDate, date: NaiveDate) -> PersonalCycles {
    let personal_year = personal_year(birth, date.year());
    // Calendar month and day are added unreduced
    let personal_month = reduce_to_single_digit(personal_year + date.month());
    let personal_day = reduce_to_single_digit(personal_month + date.day());

    PersonalCycles {
        date,
        personal_year,
        personal_month,
        personal_day,
    }
}

/// 32-bit djb2 over UTF-16 code units, matching the JavaScript
/// `((h << 5) + h + charCode) | 0` form.
pub fn djb2_hash(key: &str) -> i32 {
    key.encode_utf16().fold(DJB2_SEED, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Index into a list of `len` items for `key`; `None` when the list is empty
pub fn daily_index(key: &str, len: usize) -> Option<usize> {
    (len > 0).then(|| djb2_hash(key).unsigned_abs() as usize % len)
}

pub fn daily_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn oracle_key(date: NaiveDate) -> String {
    format!("oracle:{}", daily_key(date))
}

#[derive(Clone)]
pub struct DailyContentService {
    pool: SqlitePool,
    interpretations: InterpretationService,
}

impl DailyContentService {
    pub fn new(pool: SqlitePool, interpretations: InterpretationService) -> Self {
        Self {
            pool,
            interpretations,
        }
    }

    pub async fn daily_dream(&self, date: NaiveDate) -> Result<DailyDream, DailyContentError> {
        let count = DreamSymbol::count(&self.pool).await?;
        let index = daily_index(&daily_key(date), count as usize)
            .ok_or(DailyContentError::NoContent("dream symbols"))?;

        debug!(date = %date, index, count, "Selected daily dream");

        let symbol = DreamSymbol::find_nth(&self.pool, index as i64)
            .await?
            .ok_or(DailyContentError::NoContent("dream symbols"))?;
        Ok(DailyDream { date, symbol })
    }

    pub async fn daily_oracle(&self, date: NaiveDate) -> Result<DailyOracle, DailyContentError> {
        let count = OracleMessage::count(&self.pool).await?;
        let index = daily_index(&oracle_key(date), count as usize)
            .ok_or(DailyContentError::NoContent("oracle messages"))?;

        let message = OracleMessage::find_nth(&self.pool, index as i64)
            .await?
            .ok_or(DailyContentError::NoContent("oracle messages"))?;
        Ok(DailyOracle { date, message })
    }

    pub async fn daily_energy(&self, date: NaiveDate) -> Result<DailyEnergy, DailyContentError> {
        let report = self.interpretations.daily_report(date).await?;

        Ok(DailyEnergy {
            date,
            number: report.number,
            is_master: is_master_number(report.number),
            interpretation: report.interpretation,
            moon: moon_phase_for_date(date)?,
        })
    }

    pub async fn personal_day(
        &self,
        birth: NaiveDate,
        date: NaiveDate,
    ) -> Result<PersonalDayReport, DailyContentError> {
        validate_birth_date(birth, date)?;
        let cycles = personal_cycles(birth, date);
        let interpretation = self
            .interpretations
            .get(InterpretationCategory::PersonalDay, cycles.personal_day)
            .await?;

        Ok(PersonalDayReport {
            cycles,
            interpretation,
        })
    }
}

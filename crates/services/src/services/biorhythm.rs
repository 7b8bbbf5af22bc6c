//! Biorhythm cycles: `sin(2π · days_lived / cycle_length)`.

use std::f64::consts::TAU;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use ts_rs::TS;

pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.1;
pub const MAX_FORECAST_DAYS: u32 = 90;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BiorhythmError {
    #[error("target date {target} is before birth date {birth}")]
    BeforeBirth { birth: NaiveDate, target: NaiveDate },
    #[error("forecast length must be between 1 and 90 days, got {0}")]
    InvalidRange(u32),
    #[error("date out of range")]
    DateOverflow,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cycle {
    Physical,
    Emotional,
    Intellectual,
}

impl Cycle {
    pub const ALL: [Cycle; 3] = [Cycle::Physical, Cycle::Emotional, Cycle::Intellectual];

    pub fn length_days(&self) -> u32 {
        match self {
            Self::Physical => 23,
            Self::Emotional => 28,
            Self::Intellectual => 33,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Physical => "Fizic",
            Self::Emotional => "Emoțional",
            Self::Intellectual => "Intelectual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CycleReading {
    pub cycle: Cycle,
    pub label: String,
    pub value: f64,
    pub percentage: i32,
    pub critical: bool,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct BiorhythmReading {
    pub date: NaiveDate,
    #[ts(type = "number")]
    pub days_lived: i64,
    pub physical: CycleReading,
    pub emotional: CycleReading,
    pub intellectual: CycleReading,
    /// Mean of the three percentages, rounded
    pub average: i32,
}

impl BiorhythmReading {
    pub fn cycles(&self) -> [&CycleReading; 3] {
        [&self.physical, &self.emotional, &self.intellectual]
    }

    pub fn critical_cycles(&self) -> Vec<Cycle> {
        self.cycles()
            .into_iter()
            .filter(|r| r.critical)
            .map(|r| r.cycle)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CriticalDay {
    pub date: NaiveDate,
    pub cycles: Vec<Cycle>,
}

pub fn days_lived(birth: NaiveDate, target: NaiveDate) -> Result<i64, BiorhythmError> {
    if target < birth {
        return Err(BiorhythmError::BeforeBirth { birth, target });
    }
    Ok((target - birth).num_days())
}

pub fn cycle_value(days_lived: i64, cycle: Cycle) -> f64 {
    (TAU * days_lived as f64 / cycle.length_days() as f64).sin()
}

pub fn read_cycle(days_lived: i64, cycle: Cycle, threshold: f64) -> CycleReading {
    let value = cycle_value(days_lived, cycle);
    let next = cycle_value(days_lived + 1, cycle);

    CycleReading {
        cycle,
        label: cycle.label().to_string(),
        value,
        percentage: (value * 100.0).round() as i32,
        critical: value.abs() < threshold,
        trend: if next >= value { Trend::Rising } else { Trend::Falling },
    }
}

pub fn calculate_biorhythm(
    birth: NaiveDate,
    date: NaiveDate,
    threshold: f64,
) -> Result<BiorhythmReading, BiorhythmError> {
    let days = days_lived(birth, date)?;
    let physical = read_cycle(days, Cycle::Physical, threshold);
    let emotional = read_cycle(days, Cycle::Emotional, threshold);
    let intellectual = read_cycle(days, Cycle::Intellectual, threshold);
    let average = ((physical.percentage + emotional.percentage + intellectual.percentage) as f64
        / 3.0)
        .round() as i32;

    Ok(BiorhythmReading {
        date,
        days_lived: days,
        physical,
        emotional,
        intellectual,
        average,
    })
}

fn check_range(days: u32) -> Result<(), BiorhythmError> {
    if days == 0 || days > MAX_FORECAST_DAYS {
        return Err(BiorhythmError::InvalidRange(days));
    }
    Ok(())
}

/// `days` consecutive daily readings starting at `start`
pub fn forecast(
    birth: NaiveDate,
    start: NaiveDate,
    days: u32,
    threshold: f64,
) -> Result<Vec<BiorhythmReading>, BiorhythmError> {
    check_range(days)?;
    (0..days as u64)
        .map(|offset| {
            let date = start
                .checked_add_days(Days::new(offset))
                .ok_or(BiorhythmError::DateOverflow)?;
            calculate_biorhythm(birth, date, threshold)
        })
        .collect()
}

/// Days in `[from, from + horizon)` on which at least one cycle is critical
pub fn critical_days(
    birth: NaiveDate,
    from: NaiveDate,
    horizon: u32,
    threshold: f64,
) -> Result<Vec<CriticalDay>, BiorhythmError> {
    Ok(forecast(birth, from, horizon, threshold)?
        .into_iter()
        .filter_map(|reading| {
            let cycles = reading.critical_cycles();
            (!cycles.is_empty()).then_some(CriticalDay {
                date: reading.date,
                cycles,
            })
        })
        .collect())
}

//! Moon phase from the mean synodic month.
//!
//! The age of the Moon is the time elapsed since a reference new moon,
//! modulo the synodic month. The age is split into 8 phases, each centred on
//! a principal phase (the new moon bucket spans ±1/16 of a cycle).

use std::f64::consts::TAU;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use ts_rs::TS;

pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// 2000-01-06 18:14 UTC
pub const REFERENCE_NEW_MOON_UNIX: i64 = 947_182_440;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoonPhaseError {
    #[error("date out of range")]
    DateOverflow,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ORDER: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub fn from_age(age_days: f64) -> Self {
        let index = ((age_days / SYNODIC_MONTH_DAYS) * 8.0 + 0.5).floor() as usize % 8;
        Self::ORDER[index]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NewMoon => "Lună Nouă",
            Self::WaxingCrescent => "Semilună în Creștere",
            Self::FirstQuarter => "Primul Pătrar",
            Self::WaxingGibbous => "Lună Convexă în Creștere",
            Self::FullMoon => "Lună Plină",
            Self::WaningGibbous => "Lună Convexă în Descreștere",
            Self::LastQuarter => "Ultimul Pătrar",
            Self::WaningCrescent => "Semilună în Descreștere",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::NewMoon => "🌑",
            Self::WaxingCrescent => "🌒",
            Self::FirstQuarter => "🌓",
            Self::WaxingGibbous => "🌔",
            Self::FullMoon => "🌕",
            Self::WaningGibbous => "🌖",
            Self::LastQuarter => "🌗",
            Self::WaningCrescent => "🌘",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MoonInfo {
    pub at: DateTime<Utc>,
    pub phase: MoonPhase,
    pub name: String,
    pub emoji: String,
    pub age_days: f64,
    /// Illuminated fraction of the disc, 0.0-1.0
    pub illumination: f64,
    pub next_new_moon: DateTime<Utc>,
    pub next_full_moon: DateTime<Utc>,
}

/// Days since the last new moon, in `[0, SYNODIC_MONTH_DAYS)`
pub fn moon_age(at: DateTime<Utc>) -> f64 {
    let elapsed_ms = at.timestamp_millis() - REFERENCE_NEW_MOON_UNIX * 1000;
    (elapsed_ms as f64 / MILLIS_PER_DAY).rem_euclid(SYNODIC_MONTH_DAYS)
}

pub fn illumination(age_days: f64) -> f64 {
    (1.0 - (TAU * age_days / SYNODIC_MONTH_DAYS).cos()) / 2.0
}

fn after_days(at: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, MoonPhaseError> {
    TimeDelta::try_milliseconds((days * MILLIS_PER_DAY).round() as i64)
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or(MoonPhaseError::DateOverflow)
}

/// Next time the age reaches `target_age`, strictly after `at`
fn next_at_age(
    at: DateTime<Utc>,
    age: f64,
    target_age: f64,
) -> Result<DateTime<Utc>, MoonPhaseError> {
    let mut wait = (target_age - age).rem_euclid(SYNODIC_MONTH_DAYS);
    if wait == 0.0 {
        wait = SYNODIC_MONTH_DAYS;
    }
    after_days(at, wait)
}

/// Fails only when the next new or full moon falls past the last
/// representable date.
pub fn get_moon_phase(at: DateTime<Utc>) -> Result<MoonInfo, MoonPhaseError> {
    let age = moon_age(at);
    let phase = MoonPhase::from_age(age);

    Ok(MoonInfo {
        at,
        phase,
        name: phase.name().to_string(),
        emoji: phase.emoji().to_string(),
        age_days: age,
        illumination: illumination(age),
        next_new_moon: next_at_age(at, age, 0.0)?,
        next_full_moon: next_at_age(at, age, SYNODIC_MONTH_DAYS / 2.0)?,
    })
}

/// Moon phase for a calendar date, taken at noon UTC
pub fn moon_phase_for_date(date: NaiveDate) -> Result<MoonInfo, MoonPhaseError> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
    get_moon_phase(noon.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime<Utc> {
        DateTime::from_timestamp(REFERENCE_NEW_MOON_UNIX, 0).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_reference_is_new_moon() {
        let info = get_moon_phase(reference()).unwrap();
        assert_eq!(info.phase, MoonPhase::NewMoon);
        assert!(info.age_days.abs() < 1e-9);
        assert!(info.illumination < 1e-9);
        assert_eq!(info.name, "Lună Nouă");
    }

    #[test]
    fn test_principal_phases() {
        let at = |fraction: f64| after_days(reference(), SYNODIC_MONTH_DAYS * fraction).unwrap();
        assert_eq!(get_moon_phase(at(0.25)).unwrap().phase, MoonPhase::FirstQuarter);
        assert_eq!(get_moon_phase(at(0.5)).unwrap().phase, MoonPhase::FullMoon);
        assert_eq!(get_moon_phase(at(0.75)).unwrap().phase, MoonPhase::LastQuarter);
        assert_eq!(get_moon_phase(at(0.97)).unwrap().phase, MoonPhase::NewMoon);
        assert_eq!(get_moon_phase(at(0.125)).unwrap().phase, MoonPhase::WaxingCrescent);
    }

    #[test]
    fn test_known_lunations() {
        let full = get_moon_phase(utc("2024-01-25T17:54:00Z")).unwrap();
        assert_eq!(full.phase, MoonPhase::FullMoon);
        assert!(full.illumination > 0.99);

        let new = get_moon_phase(utc("2024-01-11T11:57:00Z")).unwrap();
        assert_eq!(new.phase, MoonPhase::NewMoon);
    }

    #[test]
    fn test_age_before_reference_is_positive() {
        let age = moon_age(utc("1999-12-25T00:00:00Z"));
        assert!((0.0..SYNODIC_MONTH_DAYS).contains(&age));
    }

    #[test]
    fn test_next_events_are_in_the_future_and_within_a_month() {
        let at = utc("2026-10-19T08:00:00Z");
        let info = get_moon_phase(at).unwrap();
        let limit = after_days(at, SYNODIC_MONTH_DAYS).unwrap();
        assert!(info.next_new_moon > at && info.next_new_moon <= limit);
        assert!(info.next_full_moon > at && info.next_full_moon <= limit);
        assert_eq!(get_moon_phase(info.next_full_moon).unwrap().phase, MoonPhase::FullMoon);
    }

    #[test]
    fn test_date_uses_noon() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        assert_eq!(moon_phase_for_date(date).unwrap().at, utc("2024-01-25T12:00:00Z"));
    }

    #[test]
    fn test_last_representable_date_is_an_error() {
        assert_eq!(
            moon_phase_for_date(NaiveDate::MAX),
            Err(MoonPhaseError::DateOverflow)
        );
        assert!(get_moon_phase(DateTime::<Utc>::MAX_UTC).is_err());
        assert!(moon_phase_for_date(NaiveDate::MIN).is_ok());
    }
}

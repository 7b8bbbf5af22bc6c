//! Numerology compatibility between two numbers (or two birth dates).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use ts_rs::TS;

use super::numerology::{calculate_life_path, compatibility_root, is_master_number};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatibilityError {
    #[error("{0} is not a numerology number (expected 1-9, 11, 22 or 33)")]
    InvalidNumber(u32),
}

/// Compatibility percentages between roots 1..=9. Symmetric.
const COMPATIBILITY_TABLE: [[u8; 9]; 9] = [
    //1   2   3   4   5   6   7   8   9
    [70, 60, 85, 55, 90, 65, 75, 80, 70], // 1
    [60, 75, 70, 85, 55, 95, 60, 80, 75], // 2
    [85, 70, 75, 50, 90, 80, 60, 65, 95], // 3
    [55, 85, 50, 80, 60, 75, 85, 90, 55], // 4
    [90, 55, 90, 60, 70, 50, 85, 65, 75], // 5
    [65, 95, 80, 75, 50, 85, 55, 70, 90], // 6
    [75, 60, 60, 85, 85, 55, 80, 50, 70], // 7
    [80, 80, 65, 90, 65, 70, 50, 75, 60], // 8
    [70, 75, 95, 55, 75, 90, 70, 60, 85], // 9
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompatibilityLevel {
    Excellent,
    VeryGood,
    Good,
    Challenging,
}

impl CompatibilityLevel {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            85.. => Self::Excellent,
            70..=84 => Self::VeryGood,
            60..=69 => Self::Good,
            _ => Self::Challenging,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excelentă",
            Self::VeryGood => "Foarte bună",
            Self::Good => "Bună",
            Self::Challenging => "Provocatoare",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => {
                "Energiile voastre se completează natural. Relația curge ușor și vă susțineți reciproc."
            }
            Self::VeryGood => {
                "Aveți o bază solidă. Diferențele mici devin surse de creștere dacă le discutați deschis."
            }
            Self::Good => {
                "Există potențial, dar relația cere efort conștient și răbdare din partea amândurora."
            }
            Self::Challenging => {
                "Ritmurile voastre diferă mult. Relația vă poate învăța multe, cu condiția să acceptați diferențele."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Compatibility {
    pub first: u32,
    pub second: u32,
    pub percentage: u8,
    pub level: CompatibilityLevel,
    pub label: String,
    pub description: String,
}

fn check_number(n: u32) -> Result<u32, CompatibilityError> {
    if (1..=9).contains(&n) || is_master_number(n) {
        Ok(n)
    } else {
        Err(CompatibilityError::InvalidNumber(n))
    }
}

pub fn calculate_compatibility(first: u32, second: u32) -> Result<Compatibility, CompatibilityError> {
    let a = compatibility_root(check_number(first)?) as usize;
    let b = compatibility_root(check_number(second)?) as usize;
    let percentage = COMPATIBILITY_TABLE[a - 1][b - 1];
    let level = CompatibilityLevel::from_percentage(percentage);

    Ok(Compatibility {
        first,
        second,
        percentage,
        level,
        label: level.label().to_string(),
        description: level.description().to_string(),
    })
}

/// Compatibility of two people by their Life Path numbers
pub fn compatibility_for_birth_dates(
    first: NaiveDate,
    second: NaiveDate,
) -> Result<Compatibility, CompatibilityError> {
    calculate_compatibility(
        calculate_life_path(first).number,
        calculate_life_path(second).number,
    )
}

//! Pythagorean numerology over the Romanian alphabet.
//!
//! Every number is reduced by repeated digit sums down to a single digit,
//! except the Master Numbers 11, 22 and 33, which are kept as they are
//! wherever they appear in a calculation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use utils::text::fold_diacritic;

pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Earliest birth year the calculators accept
pub const MIN_BIRTH_YEAR: i32 = 1900;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumerologyError {
    #[error("name contains no letters")]
    EmptyName,
    #[error("unsupported character in name: {0:?}")]
    UnsupportedCharacter(char),
    #[error("birth date is in the future")]
    BirthDateInFuture,
    #[error("birth dates before 1900 are not supported")]
    BirthDateTooEarly,
}

/// Life Path breakdown, components already reduced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct LifePath {
    pub birth_date: NaiveDate,
    pub day: u32,
    pub month: u32,
    pub year: u32,
    pub number: u32,
    pub is_master: bool,
}

/// The three numbers derived from a full name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct NameNumbers {
    pub name: String,
    pub destiny: u32,
    pub soul_urge: u32,
    pub personality: u32,
    pub letter_count: u32,
}

pub fn is_master_number(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

pub fn reduce_to_single_digit(mut n: u32) -> u32 {
    while n > 9 && !is_master_number(n) {
        n = digit_sum(n);
    }
    n
}

/// Pythagorean value of a letter: A-I = 1-9, J-R = 1-9, S-Z = 1-8.
pub fn letter_value(c: char) -> Option<u32> {
    let c = fold_diacritic(c).to_ascii_uppercase();
    c.is_ascii_uppercase().then(|| (c as u32 - 'A' as u32) % 9 + 1)
}

/// Y counts as a consonant.
pub fn is_vowel(c: char) -> bool {
    matches!(
        fold_diacritic(c).to_ascii_uppercase(),
        'A' | 'E' | 'I' | 'O' | 'U'
    )
}

fn is_name_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '\'' | '’' | '.')
}

/// Letters of `name`, rejecting anything that is neither a letter nor a separator
fn name_letters(name: &str) -> Result<Vec<char>, NumerologyError> {
    let mut letters = Vec::with_capacity(name.len());
    for c in name.chars() {
        if letter_value(c).is_some() {
            letters.push(c);
        } else if !is_name_separator(c) {
            return Err(NumerologyError::UnsupportedCharacter(c));
        }
    }
    if letters.is_empty() {
        return Err(NumerologyError::EmptyName);
    }
    Ok(letters)
}

fn letter_total(letters: &[char], keep: impl Fn(char) -> bool) -> u32 {
    letters
        .iter()
        .copied()
        .filter(|&c| keep(c))
        .filter_map(letter_value)
        .sum()
}

pub fn calculate_life_path(birth_date: NaiveDate) -> LifePath {
    let day = reduce_to_single_digit(birth_date.day());
    let month = reduce_to_single_digit(birth_date.month());
    let year = reduce_to_single_digit(birth_date.year().unsigned_abs());
    let number = reduce_to_single_digit(day + month + year);

    LifePath {
        birth_date,
        day,
        month,
        year,
        number,
        is_master: is_master_number(number),
    }
}

pub fn calculate_destiny_number(name: &str) -> Result<u32, NumerologyError> {
    let letters = name_letters(name)?;
    Ok(reduce_to_single_digit(letter_total(&letters, |_| true)))
}

/// Vowels only. A name without vowels yields 0.
pub fn calculate_soul_urge(name: &str) -> Result<u32, NumerologyError> {
    let letters = name_letters(name)?;
    Ok(reduce_to_single_digit(letter_total(&letters, is_vowel)))
}

/// Consonants only. A name without consonants yields 0.
pub fn calculate_personality(name: &str) -> Result<u32, NumerologyError> {
    let letters = name_letters(name)?;
    Ok(reduce_to_single_digit(letter_total(&letters, |c| !is_vowel(c))))
}

pub fn calculate_name_numbers(name: &str) -> Result<NameNumbers, NumerologyError> {
    let letters = name_letters(name)?;

    Ok(NameNumbers {
        name: name.trim().to_string(),
        destiny: reduce_to_single_digit(letter_total(&letters, |_| true)),
        soul_urge: reduce_to_single_digit(letter_total(&letters, is_vowel)),
        personality: reduce_to_single_digit(letter_total(&letters, |c| !is_vowel(c))),
        letter_count: letters.len() as u32,
    })
}

pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), NumerologyError> {
    if birth_date > today {
        return Err(NumerologyError::BirthDateInFuture);
    }
    if birth_date.year() < MIN_BIRTH_YEAR {
        return Err(NumerologyError::BirthDateTooEarly);
    }
    Ok(())
}

/// Root digit of a master number (11 -> 2, 22 -> 4, 33 -> 6); other numbers unchanged.
pub fn compatibility_root(n: u32) -> u32 {
    if is_master_number(n) { digit_sum(n) } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reduce_keeps_master_numbers() {
        assert_eq!(reduce_to_single_digit(0), 0);
        assert_eq!(reduce_to_single_digit(9), 9);
        assert_eq!(reduce_to_single_digit(10), 1);
        assert_eq!(reduce_to_single_digit(11), 11);
        assert_eq!(reduce_to_single_digit(22), 22);
        assert_eq!(reduce_to_single_digit(33), 33);
        assert_eq!(reduce_to_single_digit(29), 11);
        assert_eq!(reduce_to_single_digit(38), 11);
        assert_eq!(reduce_to_single_digit(44), 8);
        assert_eq!(reduce_to_single_digit(99), 9);
        assert_eq!(reduce_to_single_digit(1990), 1);
    }

    #[test]
    fn test_letter_values() {
        assert_eq!(letter_value('A'), Some(1));
        assert_eq!(letter_value('i'), Some(9));
        assert_eq!(letter_value('J'), Some(1));
        assert_eq!(letter_value('R'), Some(9));
        assert_eq!(letter_value('S'), Some(1));
        assert_eq!(letter_value('Z'), Some(8));
        assert_eq!(letter_value('7'), None);
        assert_eq!(letter_value(' '), None);
    }

    #[test]
    fn test_romanian_diacritics_fold_to_base_letter() {
        assert_eq!(letter_value('Ă'), letter_value('A'));
        assert_eq!(letter_value('â'), letter_value('a'));
        assert_eq!(letter_value('Î'), letter_value('I'));
        assert_eq!(letter_value('ș'), letter_value('s'));
        assert_eq!(letter_value('Ş'), letter_value('S'));
        assert_eq!(letter_value('ț'), Some(2));
        assert!(is_vowel('ă'));
        assert!(is_vowel('Î'));
        assert!(!is_vowel('y'));
    }

    #[test]
    fn test_life_path() {
        let lp = calculate_life_path(date(1990, 5, 15));
        assert_eq!((lp.day, lp.month, lp.year), (6, 5, 1));
        assert_eq!(lp.number, 3);
        assert!(!lp.is_master);
    }

    #[test]
    fn test_life_path_master_number() {
        let lp = calculate_life_path(date(1987, 11, 29));
        assert_eq!((lp.day, lp.month, lp.year), (11, 11, 7));
        assert_eq!(lp.number, 11);
        assert!(lp.is_master);
    }

    #[test]
    fn test_destiny_number() {
        assert_eq!(calculate_destiny_number("Ana").unwrap(), 7);
        assert_eq!(calculate_destiny_number("Ion Popescu").unwrap(), 7);
        assert_eq!(calculate_destiny_number("Ștefan").unwrap(), 2);
        assert_eq!(
            calculate_destiny_number("Ștefan").unwrap(),
            calculate_destiny_number("stefan").unwrap()
        );
    }

    #[test]
    fn test_name_numbers_split_vowels_and_consonants() {
        let numbers = calculate_name_numbers("  Ion Popescu ").unwrap();
        assert_eq!(numbers.name, "Ion Popescu");
        assert_eq!(numbers.destiny, 7);
        assert_eq!(numbers.soul_urge, 11);
        assert_eq!(numbers.personality, 5);
        assert_eq!(numbers.letter_count, 10);
    }

    #[test]
    fn test_name_separators_are_allowed() {
        assert!(calculate_destiny_number("Ana-Maria O'Brien").is_ok());
        assert!(calculate_destiny_number("I. L. Caragiale").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(calculate_destiny_number(""), Err(NumerologyError::EmptyName));
        assert_eq!(calculate_destiny_number(" - "), Err(NumerologyError::EmptyName));
        assert_eq!(
            calculate_destiny_number("Ana3"),
            Err(NumerologyError::UnsupportedCharacter('3'))
        );
    }

    #[test]
    fn test_name_without_vowels() {
        assert_eq!(calculate_soul_urge("Brr").unwrap(), 0);
        assert_eq!(calculate_personality("Ea").unwrap(), 0);
    }

    #[test]
    fn test_validate_birth_date() {
        let today = date(2026, 10, 19);
        assert!(validate_birth_date(today, today).is_ok());
        assert_eq!(
            validate_birth_date(date(2026, 10, 20), today),
            Err(NumerologyError::BirthDateInFuture)
        );
        assert_eq!(
            validate_birth_date(date(1899, 12, 31), today),
            Err(NumerologyError::BirthDateTooEarly)
        );
    }

    #[test]
    fn test_compatibility_root() {
        assert_eq!(compatibility_root(11), 2);
        assert_eq!(compatibility_root(22), 4);
        assert_eq!(compatibility_root(33), 6);
        assert_eq!(compatibility_root(7), 7);
    }
}

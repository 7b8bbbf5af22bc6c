pub mod biorhythm;
pub mod compatibility;
pub mod daily_content;
pub mod database_validator;
pub mod dream_dictionary;
pub mod interpretations;
pub mod moon_phase;
pub mod numerology;

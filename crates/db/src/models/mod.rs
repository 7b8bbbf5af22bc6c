pub mod dream_symbol;
pub mod interpretation;
pub mod oracle_message;

use crate::prelude::*;
use crate::{MAX_MONTH, MAX_YEAR};
use crate::types::Gender;

/// Reasons a raw birthdate string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Errors surfaced at the engine boundary.
///
/// Every variant is a deterministic function of the caller's input, so none
/// of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FortuneError {
    /// The birthdate was missing or matched none of the accepted formats.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(#[from] ParseError),

    /// The birth time was malformed or outside 0-23.
    #[error("Invalid hour: {0}")]
    InvalidHour(String),

    /// The gender flag was not one of the recognized spellings.
    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    /// No life palace table exists for this gender category.
    #[error("Life palace mapping not defined for {gender} charts")]
    UndefinedMapping { gender: Gender },

    /// A date search stepped outside the calendar range chrono supports.
    #[error("Date arithmetic left the supported calendar range")]
    DateOutOfRange,
}

impl FortuneError {
    /// True for errors caused by bad caller input (a 400 for an HTTP layer).
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateFormat(_) | Self::InvalidHour(_) | Self::InvalidGender(_)
        )
    }
}

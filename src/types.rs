use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, HOURS_PER_DAY,
    LEAP_YEAR_CYCLE, MAX_HOUR, MAX_MONTH, MAX_YEAR,
};
use crate::prelude::*;
use crate::{FortuneError, ParseError};
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU16, NonZeroU8};
use std::str::FromStr;

/// A birth year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Ok(Self(year)),
            _ => Err(ParseError::InvalidYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

/// A calendar month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(ParseError::InvalidMonth(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

/// A day of month, validated against a concrete year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Day(NonZeroU8);

impl Day {
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month: month.get(),
            day: value,
            year: year.get(),
        };
        match NonZeroU8::new(value) {
            Some(day) if value <= days_in_month(year.get(), month.get()) => Ok(Self(day)),
            _ => Err(invalid),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// An hour of the day in `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{:02}", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct BirthHour(u8);

impl BirthHour {
    /// # Errors
    /// Returns `FortuneError::InvalidHour` if the value is above 23.
    pub fn new(value: u8) -> Result<Self, FortuneError> {
        if value > MAX_HOUR {
            return Err(FortuneError::InvalidHour(format!("{value} (must be 0-{MAX_HOUR})")));
        }
        Ok(Self(value))
    }

    /// Wraps any hour onto the clock face, so 24 becomes 0 and 47 becomes 23.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn normalized(value: u32) -> Self {
        Self((value % HOURS_PER_DAY as u32) as u8)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BirthHour {
    type Error = FortuneError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BirthHour> for u8 {
    fn from(hour: BirthHour) -> Self {
        hour.0
    }
}

/// Gender flag used to pick a life palace table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    #[display(fmt = "male")]
    MaleLike,
    #[display(fmt = "female")]
    FemaleLike,
}

impl FromStr for Gender {
    type Err = FortuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "male_like" => Ok(Self::MaleLike),
            "female" | "f" | "female_like" => Ok(Self::FemaleLike),
            _ => Err(FortuneError::InvalidGender(s.to_owned())),
        }
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

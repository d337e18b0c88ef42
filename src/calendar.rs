//! Birthdate and birth time parsing, plus the small amount of date
//! arithmetic the searches need.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{BirthHour, Day, Month, Year};
use crate::{
    DATE_SEPARATOR, FortuneError, MAX_MINUTE, MONTH_DAY_MAX_DIGITS, ParseError, SLASH_SEPARATOR, TIME_SEPARATOR,
    YEAR_DIGITS,
};

/// A concrete Gregorian date with a year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from already validated components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if chrono rejects the combination.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        NaiveDate::from_ymd_opt(i32::from(year.get()), u32::from(month.get()), u32::from(day.get()))
            .map(Self)
            .ok_or(ParseError::InvalidDay {
                month: month.get(),
                day: day.get(),
                year: year.get(),
            })
    }

    /// # Errors
    /// Returns the `ParseError` for the first component that fails validation.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Self::from_parts(year, month, day)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(&self) -> u16 {
        // Construction keeps the year inside 1..=MAX_YEAR.
        self.0.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The eight digit `YYYYMMDD` form used by numerology and seeding.
    pub fn digits(&self) -> String {
        format!("{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }

    /// Each decimal digit of [`Self::digits`], most significant first.
    pub fn digit_values(&self) -> Vec<u32> {
        self.digits().chars().filter_map(|c| c.to_digit(10)).collect()
    }

    /// The legacy `DDMMYYYY` integer used to seed the uniform lucky number draw.
    pub fn day_first_number(&self) -> u64 {
        u64::from(self.day()) * 1_000_000 + u64::from(self.month()) * 10_000 + u64::from(self.year())
    }

    /// ISO weekday, Monday = 1 through Sunday = 7.
    pub fn iso_weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// # Errors
    /// Returns `FortuneError::DateOutOfRange` if the result leaves `1..=MAX_YEAR`.
    pub fn add_days(&self, days: u32) -> Result<Self, FortuneError> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or(FortuneError::DateOutOfRange)
            .and_then(Self::try_from)
    }

    /// This date's month and day moved into `year`. A Feb 29 birthday lands
    /// on Feb 28 in common years.
    ///
    /// # Errors
    /// Returns `FortuneError::DateOutOfRange` if `year` is outside `1..=MAX_YEAR`.
    pub fn anniversary_in(&self, year: u16) -> Result<Self, FortuneError> {
        let year = Year::new(year).map_err(|_| FortuneError::DateOutOfRange)?;
        let month = Month::new(self.month())?;
        let day = (1..=self.day())
            .rev()
            .find_map(|d| Day::new(d, year, month).ok())
            .ok_or(FortuneError::DateOutOfRange)?;
        Ok(Self::from_parts(year, month, day)?)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = FortuneError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| FortuneError::DateOutOfRange)?;
        Year::new(year).map_err(|_| FortuneError::DateOutOfRange)?;
        Ok(Self(date))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

/// Strict `YYYY-MM-DD` parsing.
impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::Iso.parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single literal date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Iso,
    /// `DD/MM/YYYY`
    DayFirst,
    /// `MM/DD/YYYY`
    MonthFirst,
}

impl DateFormat {
    /// # Errors
    /// `InvalidFormat` for a wrong shape or non-numeric component, otherwise
    /// the component error from validation.
    pub fn parse(self, s: &str) -> Result<CalendarDate, ParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let separator = match self {
            Self::Iso => DATE_SEPARATOR,
            Self::DayFirst | Self::MonthFirst => SLASH_SEPARATOR,
        };
        let parts: Vec<&str> = trimmed.split(separator).map(str::trim).collect();
        let [a, b, c] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        };

        let (year, month, day) = match self {
            Self::Iso => (parse_year(a)?, parse_month_or_day(b)?, parse_month_or_day(c)?),
            Self::DayFirst => (parse_year(c)?, parse_month_or_day(b)?, parse_month_or_day(a)?),
            Self::MonthFirst => (parse_year(c)?, parse_month_or_day(a)?, parse_month_or_day(b)?),
        };
        CalendarDate::from_ymd(year, month, day)
    }
}

/// A year is exactly `YEAR_DIGITS` digits.
fn parse_year(s: &str) -> Result<u16, ParseError> {
    parse_digits_of_width(s, YEAR_DIGITS..=YEAR_DIGITS)
}

/// Months and days take one or two digits.
fn parse_month_or_day(s: &str) -> Result<u8, ParseError> {
    parse_digits_of_width(s, 1..=MONTH_DAY_MAX_DIGITS)
}

fn parse_digits_of_width<T: FromStr>(s: &str, width: RangeInclusive<usize>) -> Result<T, ParseError> {
    if !width.contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<T>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Which layouts a caller accepts for the birthdate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormats {
    /// `YYYY-MM-DD` only
    #[default]
    Iso,
    /// `YYYY-MM-DD`, then `DD/MM/YYYY`, then `MM/DD/YYYY`
    Flexible,
}

impl DateFormats {
    pub const fn formats(self) -> &'static [DateFormat] {
        match self {
            Self::Iso => &[DateFormat::Iso],
            Self::Flexible => &[DateFormat::Iso, DateFormat::DayFirst, DateFormat::MonthFirst],
        }
    }
}

impl FromStr for DateFormats {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(Self::Iso),
            "flexible" => Ok(Self::Flexible),
            other => Err(format!("unknown date format policy: {other}")),
        }
    }
}

/// Parses a birthdate, trying `formats` in order and keeping the first match.
///
/// When nothing matches, the error reported is the one from the first
/// format tried.
///
/// # Errors
/// Returns `FortuneError::InvalidDateFormat` for empty input or when no format matches.
pub fn parse_date(raw: &str, formats: &[DateFormat]) -> Result<CalendarDate, FortuneError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyInput.into());
    }

    let mut first_error = None;
    for format in formats {
        match format.parse(raw) {
            Ok(date) => return Ok(date),
            Err(err) => {
                first_error.get_or_insert(err);
            },
        }
    }
    Err(first_error.unwrap_or_else(|| ParseError::InvalidFormat(raw.trim().to_owned())).into())
}

/// Parses a birth time given either as a bare hour (`"8"`) or as `HH:MM`.
///
/// # Errors
/// Returns `FortuneError::InvalidHour` for empty, malformed, or out of range input.
pub fn parse_hour(raw: &str) -> Result<BirthHour, FortuneError> {
    let trimmed = raw.trim();
    let invalid = || FortuneError::InvalidHour(trimmed.to_owned());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let hour_part = match trimmed.split_once(TIME_SEPARATOR) {
        Some((hour, minute)) => {
            let minute = parse_digits(minute).ok_or_else(invalid)?;
            if minute > MAX_MINUTE {
                return Err(invalid());
            }
            hour
        },
        None => trimmed,
    };

    let hour = parse_digits(hour_part).ok_or_else(invalid)?;
    BirthHour::new(hour)
}

fn parse_digits(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_iso_date() {
        let parsed = parse_date("1990-01-08", DateFormats::Iso.formats()).unwrap();
        assert_eq!(parsed, date(1990, 1, 8));
        assert_eq!(parsed.to_string(), "1990-01-08");
    }

    #[test]
    fn test_parse_with_whitespace() {
        let parsed = parse_date("  1990-01-08 ", DateFormats::Iso.formats()).unwrap();
        assert_eq!(parsed, date(1990, 1, 8));
    }

    #[test]
    fn test_strict_rejects_slash_formats() {
        let result = parse_date("08/01/1990", DateFormats::Iso.formats());
        assert!(matches!(result, Err(FortuneError::InvalidDateFormat(ParseError::InvalidFormat(_)))));
    }

    #[test]
    fn test_flexible_prefers_day_first() {
        let formats = DateFormats::Flexible.formats();
        // Ambiguous: read as 8 January, not 1 August
        assert_eq!(parse_date("08/01/1990", formats).unwrap(), date(1990, 1, 8));
        // Not a valid day-first date, so month-first wins
        assert_eq!(parse_date("08/15/1991", formats).unwrap(), date(1991, 8, 15));
        assert_eq!(parse_date("1991-08-15", formats).unwrap(), date(1991, 8, 15));
    }

    #[test]
    fn test_parse_date_failures() {
        struct TestCase {
            raw:         &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase { raw: "not-a-date", description: "garbage" },
            TestCase { raw: "", description: "empty" },
            TestCase { raw: "   ", description: "whitespace only" },
            TestCase { raw: "1990-13-01", description: "month 13" },
            TestCase { raw: "2021-02-29", description: "Feb 29 in a common year" },
            TestCase { raw: "1990-01-08-01", description: "too many separators" },
            TestCase { raw: "0000-01-01", description: "year zero" },
            TestCase { raw: "1990-+1-08", description: "signed component" },
            TestCase { raw: "90-01-08", description: "two digit year" },
            TestCase { raw: "8/1/90", description: "two digit year, slash form" },
            TestCase { raw: "1990-001-0008", description: "over-padded month and day" },
            TestCase { raw: "01990-01-08", description: "five digit year" },
        ];

        for case in &cases {
            let result = parse_date(case.raw, DateFormats::Flexible.formats());
            assert!(
                matches!(result, Err(FortuneError::InvalidDateFormat(_))),
                "Expected InvalidDateFormat for: {}",
                case.description
            );
        }
    }

    #[test]
    fn test_component_widths() {
        let formats = DateFormats::Flexible.formats();
        assert_eq!(parse_date("1990-1-8", formats).unwrap(), date(1990, 1, 8));
        assert_eq!(parse_date("8/1/1990", formats).unwrap(), date(1990, 1, 8));
        assert_eq!(parse_date("0990-01-08", formats).unwrap(), date(990, 1, 8));
        assert_eq!(
            parse_date("90-01-08", DateFormats::Iso.formats()),
            Err(FortuneError::InvalidDateFormat(ParseError::InvalidFormat("90".to_owned())))
        );
        assert_eq!(
            parse_date("1990-001-08", DateFormats::Iso.formats()),
            Err(FortuneError::InvalidDateFormat(ParseError::InvalidFormat("001".to_owned())))
        );
    }

    #[test]
    fn test_empty_input_reported() {
        let result = parse_date("", DateFormats::Iso.formats());
        assert_eq!(result, Err(FortuneError::InvalidDateFormat(ParseError::EmptyInput)));
    }

    #[test]
    fn test_first_format_error_kept() {
        let result = parse_date("31/02/2020", DateFormats::Flexible.formats());
        assert!(matches!(
            result,
            Err(FortuneError::InvalidDateFormat(ParseError::InvalidFormat(_)))
        ));

        let result = parse_date("1990-02-30", DateFormats::Flexible.formats());
        assert!(matches!(
            result,
            Err(FortuneError::InvalidDateFormat(ParseError::InvalidDay { day: 30, .. }))
        ));
    }

    #[test]
    fn test_parse_hour_accepts_both_shapes() {
        assert_eq!(parse_hour("8").unwrap().get(), 8);
        assert_eq!(parse_hour("08:30").unwrap().get(), 8);
        assert_eq!(parse_hour(" 23:59 ").unwrap().get(), 23);
        assert_eq!(parse_hour("0").unwrap().get(), 0);
        assert_eq!(parse_hour("00:00").unwrap().get(), 0);
    }

    #[test]
    fn test_parse_hour_failures() {
        for raw in ["25", "24:00", "", "ab", "-1", "08:60", "08:", ":30", "8.5"] {
            assert!(
                matches!(parse_hour(raw), Err(FortuneError::InvalidHour(_))),
                "Expected InvalidHour for {raw:?}"
            );
        }
    }

    #[test]
    fn test_digits() {
        let d = date(1990, 1, 8);
        assert_eq!(d.digits(), "19900108");
        assert_eq!(d.digit_values(), vec![1, 9, 9, 0, 0, 1, 0, 8]);
        assert_eq!(d.day_first_number(), 8_011_990);
    }

    #[test]
    fn test_add_days_rolls_over() {
        assert_eq!(date(2024, 12, 31).add_days(1).unwrap(), date(2025, 1, 1));
        assert_eq!(date(2024, 2, 28).add_days(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 1).add_days(0).unwrap(), date(2024, 1, 1));
        assert_eq!(date(9999, 12, 31).add_days(1), Err(FortuneError::DateOutOfRange));
    }

    #[test]
    fn test_iso_weekday() {
        // 2026-10-16 is a Friday
        assert_eq!(date(2026, 10, 16).iso_weekday(), 5);
        // 1990-01-08 was a Monday
        assert_eq!(date(1990, 1, 8).iso_weekday(), 1);
    }

    #[test]
    fn test_anniversary_clamps_leap_day() {
        let leap_birthday = date(2000, 2, 29);
        assert_eq!(leap_birthday.anniversary_in(2026).unwrap(), date(2026, 2, 28));
        assert_eq!(leap_birthday.anniversary_in(2028).unwrap(), date(2028, 2, 29));
        assert_eq!(date(1990, 1, 8).anniversary_in(2026).unwrap(), date(2026, 1, 8));
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(1990, 1, 8);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""1990-01-08""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
        assert!(serde_json::from_str::<CalendarDate>(r#""1990-02-30""#).is_err());
    }

    #[test]
    fn test_try_from_naive_rejects_far_future() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert_eq!(CalendarDate::try_from(far), Err(FortuneError::DateOutOfRange));
    }
}

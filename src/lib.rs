//! Deterministic birthdate readings: zodiac sign, life path number, lucky
//! numbers and days, and the earthly branch and life palace of the birth hour.

mod auspicious;
mod branch;
mod calendar;
mod clock;
mod config;
mod consts;
mod error;
mod fortune;
mod numerology;
mod prelude;
mod range;
mod seed;
mod types;
mod zodiac;

#[cfg(test)]
mod test_utils;

pub use auspicious::{
    LuckyDay, LuckyDayPolicy, SearchWindows, birthday_offset_day, day_score, is_partner_candidate, lucky_day,
    partner_match_day, scored_scan_day, seeded_offset_day,
};
pub use branch::{HOUR_BRANCH_TABLE, HourBranch, LifePalace, PalaceReading, hour_branch, life_palace};
pub use calendar::{CalendarDate, DateFormat, DateFormats, parse_date, parse_hour};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, EngineConfig};
pub use consts::*;
pub use error::{FortuneError, ParseError};
pub use fortune::{BirthInput, FortuneEngine, FortuneRecord, FortuneRequest, aggregate};
pub use numerology::{
    LifePath, LuckyNumberPolicy, derived_candidates, digit_sum, is_favored, life_path, lucky_numbers,
    lucky_numbers_with, reduce, reduce_to_digit,
};
pub use range::{MonthDay, MonthDaySpan, in_wrapping_range};
pub use seed::{SeedPurpose, derive_seed, seeded_rng};
pub use types::{BirthHour, Day, Gender, Month, Year, days_in_month, is_leap_year};
pub use zodiac::{ZODIAC_TABLE, ZodiacResult, ZodiacSign, zodiac};

/// Latest supported birth or search year
pub const MAX_YEAR: u16 = 9999;

/// Months per year
pub const MAX_MONTH: u8 = 12;

pub const FEBRUARY: u8 = 2;

/// February length in a leap year
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days per month in a common year, indexed by month number (index 0 unused)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap rule: divisible by 4, except centuries not divisible by 400
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Digits in a written year
pub const YEAR_DIGITS: usize = 4;
/// Most digits a written month or day may take
pub const MONTH_DAY_MAX_DIGITS: usize = 2;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator used by the day-first and month-first formats
pub const SLASH_SEPARATOR: char = '/';
/// Separator between hour and minute in a birth time
pub const TIME_SEPARATOR: char = ':';

/// Hours in a day; birth hours are normalized modulo this value
pub const HOURS_PER_DAY: u8 = 24;
/// Largest valid birth hour
pub const MAX_HOUR: u8 = 23;
/// Largest valid birth minute
pub const MAX_MINUTE: u8 = 59;

/// Numerology values that are never reduced further
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];
/// Reduction stops once the running digit sum is at or below this value
pub const SINGLE_DIGIT_MAX: u32 = 9;

/// Lucky numbers are drawn from `1..=LUCKY_NUMBER_MAX`
pub const LUCKY_NUMBER_MAX: u8 = 49;
/// Default size of a lucky number set
pub const DEFAULT_LUCKY_COUNT: usize = 6;
/// Weight of a favored number in the lucky number pool
pub const FAVORED_WEIGHT: u32 = 3;
/// Weight of every other number in the lucky number pool
pub const BASE_WEIGHT: u32 = 1;

/// Forward window for the offset strategies, in days
pub const DEFAULT_OFFSET_WINDOW_DAYS: u32 = 60;
/// Number of days inspected by the scored scan, starting today
pub const DEFAULT_SCAN_DAYS: u32 = 30;
/// Forward window for the partner-match search, in days
pub const DEFAULT_PARTNER_WINDOW_DAYS: u32 = 60;
/// Upper bound for every configurable search window
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Scored scan: the day's life path equals the birth life path
pub const SCORE_EXACT_MATCH: u32 = 10;
/// Scored scan: the day's life path has the same parity
pub const SCORE_SAME_PARITY: u32 = 5;
/// Scored scan: anything else
pub const SCORE_BASELINE: u32 = 2;
/// Scored scan: inclusive upper bound of the seeded jitter
pub const SCORE_MAX_JITTER: u32 = 3;

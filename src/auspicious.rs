//! Forward searches for a "lucky day" and a "partner-match day".
//!
//! Every search takes `today` as an argument. Callers read their clock once
//! and pass the same value to each search so a single reading stays
//! internally consistent.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::numerology::{LifePath, life_path, reduce, reduce_to_digit};
use crate::seed::{SeedPurpose, derive_seed, seeded_rng};
use crate::{FortuneError, SCORE_BASELINE, SCORE_EXACT_MATCH, SCORE_MAX_JITTER, SCORE_SAME_PARITY};

/// Strategy used to pick the lucky day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LuckyDayPolicy {
    /// Score each of the next `scan_days` days against the birth life path.
    #[default]
    ScoredScan,
    /// Today plus a seeded offset in `1..=window`.
    SeededOffset,
    /// This year's birthday plus a seeded offset in `1..=window`.
    BirthdayOffset,
}

impl FromStr for LuckyDayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scored-scan" | "scored_scan" | "scan" => Ok(Self::ScoredScan),
            "seeded-offset" | "seeded_offset" | "offset" => Ok(Self::SeededOffset),
            "birthday-offset" | "birthday_offset" => Ok(Self::BirthdayOffset),
            other => Err(format!("unknown lucky day policy: {other}")),
        }
    }
}

/// A selected day, with its score when the strategy produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LuckyDay {
    pub date:  CalendarDate,
    pub score: Option<u32>,
}

/// Window sizes for the searches, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindows {
    pub offset_days:  u32,
    pub scan_days:    u32,
    pub partner_days: u32,
}

/// # Errors
/// Returns `FortuneError::DateOutOfRange` if the search steps past year 9999.
pub fn lucky_day(
    birth: &CalendarDate,
    today: CalendarDate,
    policy: LuckyDayPolicy,
    windows: SearchWindows,
) -> Result<LuckyDay, FortuneError> {
    let day = match policy {
        LuckyDayPolicy::ScoredScan => scored_scan_day(birth, today, windows.scan_days)?,
        LuckyDayPolicy::SeededOffset => seeded_offset_day(birth, today, windows.offset_days)?,
        LuckyDayPolicy::BirthdayOffset => birthday_offset_day(birth, today, windows.offset_days)?,
    };
    tracing::debug!(%birth, %today, ?policy, date = %day.date, score = ?day.score, "selected lucky day");
    Ok(day)
}

/// Score of a candidate day whose own life path is `day_path`.
pub fn day_score(day_path: LifePath, birth_path: LifePath) -> u32 {
    if day_path == birth_path {
        SCORE_EXACT_MATCH
    } else if day_path.get() % 2 == birth_path.get() % 2 {
        SCORE_SAME_PARITY
    } else {
        SCORE_BASELINE
    }
}

/// Scans `today` and the following days, `scan_days` in total, adding a
/// seeded jitter of `0..=SCORE_MAX_JITTER` to each score. The earliest day
/// holding the maximum wins.
///
/// # Errors
/// Returns `FortuneError::DateOutOfRange` if the scan steps past year 9999.
pub fn scored_scan_day(birth: &CalendarDate, today: CalendarDate, scan_days: u32) -> Result<LuckyDay, FortuneError> {
    let birth_path = life_path(birth);
    let mut rng = seeded_rng(birth, SeedPurpose::LuckyDay);

    let mut best = LuckyDay { date: today, score: None };
    let mut best_score = 0;
    for offset in 0..scan_days.max(1) {
        let candidate = today.add_days(offset)?;
        let score = day_score(life_path(&candidate), birth_path) + rng.gen_range(0..=SCORE_MAX_JITTER);
        tracing::trace!(%candidate, score, "scored candidate day");
        if best.score.is_none() || score > best_score {
            best_score = score;
            best = LuckyDay {
                date:  candidate,
                score: Some(score),
            };
        }
    }
    Ok(best)
}

/// # Errors
/// Returns `FortuneError::DateOutOfRange` if the result is past year 9999.
pub fn seeded_offset_day(
    birth: &CalendarDate,
    today: CalendarDate,
    window_days: u32,
) -> Result<LuckyDay, FortuneError> {
    let offset = seeded_rng(birth, SeedPurpose::LuckyDay).gen_range(1..=window_days.max(1));
    Ok(LuckyDay {
        date:  today.add_days(offset)?,
        score: None,
    })
}

/// # Errors
/// Returns `FortuneError::DateOutOfRange` if the result is past year 9999.
pub fn birthday_offset_day(
    birth: &CalendarDate,
    today: CalendarDate,
    window_days: u32,
) -> Result<LuckyDay, FortuneError> {
    let anniversary = birth.anniversary_in(today.year())?;
    let offset = seeded_rng(birth, SeedPurpose::LuckyDay).gen_range(1..=window_days.max(1));
    Ok(LuckyDay {
        date:  anniversary.add_days(offset)?,
        score: None,
    })
}

/// True when `candidate` resonates with the birth life path: its month plus
/// day reduces to the life path, or its ISO weekday matches the life path
/// reduced to one digit.
pub fn is_partner_candidate(candidate: &CalendarDate, birth_path: LifePath) -> bool {
    let month_day = reduce(u32::from(candidate.month()) + u32::from(candidate.day()));
    month_day == u32::from(birth_path)
        || reduce_to_digit(candidate.iso_weekday()) == reduce_to_digit(u32::from(birth_path))
}

/// Picks a relationship-friendly day in `today + 1 ..= today + window_days`.
///
/// Qualifying days are indexed by the birthdate seed modulo their count.
/// With no qualifying day the result is `today + life_path` days.
///
/// # Errors
/// Returns `FortuneError::DateOutOfRange` if the search steps past year 9999.
pub fn partner_match_day(
    birth: &CalendarDate,
    today: CalendarDate,
    window_days: u32,
) -> Result<CalendarDate, FortuneError> {
    let birth_path = life_path(birth);

    let mut candidates = Vec::new();
    for offset in 1..=window_days {
        let candidate = today.add_days(offset)?;
        if is_partner_candidate(&candidate, birth_path) {
            candidates.push(candidate);
        }
    }

    if candidates.is_empty() {
        tracing::warn!(%birth, %today, window_days, "no partner-match candidates, using life path offset");
        return today.add_days(u32::from(birth_path));
    }

    let seed = derive_seed(birth, SeedPurpose::PartnerDay);
    #[allow(clippy::cast_possible_truncation)]
    let index = (seed % candidates.len() as u64) as usize;
    tracing::debug!(%birth, candidates = candidates.len(), index, "selected partner-match day");
    Ok(candidates[index])
}

//! Life-path reduction and lucky number draws.

use std::collections::BTreeSet;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::prelude::*;
use crate::seed::{SeedPurpose, seeded_rng};
use crate::{BASE_WEIGHT, FAVORED_WEIGHT, LUCKY_NUMBER_MAX, MASTER_NUMBERS, SINGLE_DIGIT_MAX};

/// A reduced numerology value: `1..=9`, or one of the master numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct LifePath(u8);

impl LifePath {
    /// Accepts only values a reduction can produce.
    pub(crate) fn new(value: u8) -> Option<Self> {
        let reduced = (1..=SINGLE_DIGIT_MAX).contains(&u32::from(value)) || MASTER_NUMBERS.contains(&u32::from(value));
        reduced.then_some(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn is_master(self) -> bool {
        MASTER_NUMBERS.contains(&u32::from(self.0))
    }

    pub const fn meaning(self) -> &'static str {
        match self.0 {
            1 => "Leader and pioneer. You are independent, driven, and full of fresh ideas.",
            2 => "Peacemaker and partner. You bring balance, diplomacy, and emotional intelligence.",
            3 => "Creative communicator. You inspire through words, art, and joyful energy.",
            4 => "Builder and stabilizer. You value structure, hard work, and trustworthiness.",
            5 => "Adventurer and freedom seeker. You thrive on change, travel, and excitement.",
            6 => "Nurturer and healer. You protect those you love and create harmony at home.",
            7 => "Thinker and seeker. You are introspective, intuitive, and spiritually aware.",
            8 => "Ambitious powerhouse. You're destined for success, leadership, and wealth.",
            9 => "Humanitarian and dreamer. You uplift others with your wisdom and compassion.",
            11 => "Spiritual illuminator. You are highly intuitive and meant to inspire masses.",
            22 => "Master builder. You turn big dreams into real-world legacies.",
            33 => "Compassionate teacher. You lead through unconditional love and service.",
            _ => "A unique force with uncommon traits.",
        }
    }
}

impl From<LifePath> for u32 {
    fn from(value: LifePath) -> Self {
        Self::from(value.0)
    }
}

pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Repeated digit sum that stops at a single digit or at a master number.
pub fn reduce(mut n: u32) -> u32 {
    while n > SINGLE_DIGIT_MAX && !MASTER_NUMBERS.contains(&n) {
        n = digit_sum(n);
    }
    n
}

/// Repeated digit sum all the way down to a single digit.
pub fn reduce_to_digit(mut n: u32) -> u32 {
    while n > SINGLE_DIGIT_MAX {
        n = digit_sum(n);
    }
    n
}

/// Sums the `YYYYMMDD` digits and reduces, keeping 11, 22 and 33 intact.
#[allow(clippy::cast_possible_truncation)]
pub fn life_path(date: &CalendarDate) -> LifePath {
    let total: u32 = date.digit_values().iter().sum();
    // reduce() never returns more than 33
    let value = reduce(total) as u8;
    debug_assert!(LifePath::new(value).is_some(), "{total} reduced to {value}");
    LifePath(value)
}

/// How a lucky number set is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuckyNumberPolicy {
    /// Seeded weighted draw favoring numbers tied to the life path and the date digits
    #[default]
    Weighted,
    /// Legacy uniform draw seeded directly from the `DDMMYYYY` integer
    Uniform,
    /// Arithmetic candidates from the life path and date, topped up by the weighted draw
    Derived,
}

impl FromStr for LuckyNumberPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(Self::Weighted),
            "uniform" => Ok(Self::Uniform),
            "derived" => Ok(Self::Derived),
            other => Err(format!("unknown lucky number policy: {other}")),
        }
    }
}

/// Ascending, duplicate-free lucky numbers in `1..=LUCKY_NUMBER_MAX`.
pub fn lucky_numbers_with(date: &CalendarDate, count: usize, policy: LuckyNumberPolicy) -> Vec<u8> {
    let count = count.min(usize::from(LUCKY_NUMBER_MAX));
    let numbers = match policy {
        LuckyNumberPolicy::Weighted => weighted_draw(date, count, &BTreeSet::new()),
        LuckyNumberPolicy::Uniform => uniform_draw(date, count),
        LuckyNumberPolicy::Derived => {
            let preselected: BTreeSet<u8> = derived_candidates(date).into_iter().take(count).collect();
            let mut numbers = weighted_draw(date, count - preselected.len(), &preselected);
            numbers.extend(preselected);
            numbers.sort_unstable();
            numbers
        },
    };
    tracing::debug!(%date, ?policy, ?numbers, "drew lucky numbers");
    numbers
}

/// The canonical weighted draw.
pub fn lucky_numbers(date: &CalendarDate, count: usize) -> Vec<u8> {
    lucky_numbers_with(date, count, LuckyNumberPolicy::Weighted)
}

/// True for numbers sharing the life path's residue mod 9, and for the
/// non-zero digits of the date itself.
pub fn is_favored(n: u8, life_path: LifePath, date_digits: &[u32]) -> bool {
    u32::from(n) % 9 == u32::from(life_path) % 9 || date_digits.contains(&u32::from(n))
}

fn weighted_draw(date: &CalendarDate, count: usize, exclude: &BTreeSet<u8>) -> Vec<u8> {
    let path = life_path(date);
    let digits = date.digit_values();
    let mut pool: Vec<(u8, u32)> = (1..=LUCKY_NUMBER_MAX)
        .filter(|n| !exclude.contains(n))
        .map(|n| {
            let weight = if is_favored(n, path, &digits) { FAVORED_WEIGHT } else { BASE_WEIGHT };
            (n, weight)
        })
        .collect();

    let mut rng = seeded_rng(date, SeedPurpose::LuckyNumbers);
    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count && !pool.is_empty() {
        let total: u32 = pool.iter().map(|(_, w)| w).sum();
        let mut ticket = rng.gen_range(0..total);
        let index = pool
            .iter()
            .position(|(_, weight)| {
                if ticket < *weight {
                    true
                } else {
                    ticket -= weight;
                    false
                }
            })
            .unwrap_or(pool.len() - 1);
        let (number, _) = pool.swap_remove(index);
        chosen.push(number);
    }

    if chosen.len() < count {
        tracing::warn!(%date, wanted = count, got = chosen.len(), "lucky number pool exhausted");
    }
    chosen.sort_unstable();
    chosen
}

#[allow(clippy::cast_possible_truncation)]
fn uniform_draw(date: &CalendarDate, count: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(date.day_first_number());
    let mut numbers: Vec<u8> = rand::seq::index::sample(&mut rng, usize::from(LUCKY_NUMBER_MAX), count)
        .into_iter()
        // indices are below LUCKY_NUMBER_MAX
        .map(|i| i as u8 + 1)
        .collect();
    numbers.sort_unstable();
    numbers
}

/// Numbers computed arithmetically from the life path, day and month,
/// kept when they land in `1..=LUCKY_NUMBER_MAX`, ascending.
#[allow(clippy::cast_possible_truncation)]
pub fn derived_candidates(date: &CalendarDate) -> Vec<u8> {
    let path = u32::from(life_path(date));
    let day = u32::from(date.day());
    let month = u32::from(date.month());

    let raw = [
        path,
        day,
        month,
        (path + day) % 100,
        (path + month) % 100,
        (path * 3) % 100,
        (path * path) % 100,
    ];
    raw.into_iter()
        .filter(|n| (1..=u32::from(LUCKY_NUMBER_MAX)).contains(n))
        .map(|n| n as u8)
        .collect::<BTreeSet<u8>>()
        .into_iter()
        .collect()
}

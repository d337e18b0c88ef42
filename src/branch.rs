//! Birth hour to earthly branch, and branch to life palace (Ming Gong).
//!
//! Both stages are fixed lookup tables. Nothing here is derived from solar
//! terms or the lunar calendar.

use serde::{Serialize, Serializer};

use crate::prelude::*;
use crate::range::in_wrapping_range;
use crate::types::{BirthHour, Gender};
use crate::FortuneError;

/// The twelve two-hour periods of the traditional day, starting at 23:00.
///
/// 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
pub enum HourBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// `(first hour, last hour, branch)`, inclusive. Zi wraps midnight.
pub const HOUR_BRANCH_TABLE: [(u8, u8, HourBranch); 12] = [
    (23, 0, HourBranch::Zi),
    (1, 2, HourBranch::Chou),
    (3, 4, HourBranch::Yin),
    (5, 6, HourBranch::Mao),
    (7, 8, HourBranch::Chen),
    (9, 10, HourBranch::Si),
    (11, 12, HourBranch::Wu),
    (13, 14, HourBranch::Wei),
    (15, 16, HourBranch::Shen),
    (17, 18, HourBranch::You),
    (19, 20, HourBranch::Xu),
    (21, 22, HourBranch::Hai),
];

impl HourBranch {
    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// The `(first, last)` hours covered by this branch.
    pub fn hours(self) -> (u8, u8) {
        let (first, last, _) = HOUR_BRANCH_TABLE
            .iter()
            .find(|(_, _, branch)| *branch == self)
            .unwrap_or(&HOUR_BRANCH_TABLE[0]);
        (*first, *last)
    }
}

/// Maps an hour to its branch. Hours past 23 wrap around the clock first.
///
/// # Errors
/// Returns `FortuneError::InvalidHour` if no table row covers the hour,
/// which cannot happen once the hour is normalized.
pub fn hour_branch(hour: u32) -> Result<HourBranch, FortuneError> {
    let hour = BirthHour::normalized(hour).get();
    HOUR_BRANCH_TABLE
        .iter()
        .find(|(start, end, _)| in_wrapping_range(hour, *start, *end))
        .map(|(_, _, branch)| *branch)
        .ok_or_else(|| FortuneError::InvalidHour(format!("{hour} is not covered by any branch")))
}

/// One of the twelve fixed life palace labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", label)]
pub struct LifePalace {
    pub branch: HourBranch,
    pub label:  &'static str,
}

impl Serialize for LifePalace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label)
    }
}

/// Birth branch to palace for male-like charts, read as a January chart:
/// the palace counts backwards from Yin by the hour branch index.
const MALE_PALACE_TABLE: [(HourBranch, LifePalace); 12] = [
    (HourBranch::Zi, palace(HourBranch::Yin, "Yin Palace (寅宫)")),
    (HourBranch::Chou, palace(HourBranch::Chou, "Chou Palace (丑宫)")),
    (HourBranch::Yin, palace(HourBranch::Zi, "Zi Palace (子宫)")),
    (HourBranch::Mao, palace(HourBranch::Hai, "Hai Palace (亥宫)")),
    (HourBranch::Chen, palace(HourBranch::Xu, "Xu Palace (戌宫)")),
    (HourBranch::Si, palace(HourBranch::You, "You Palace (酉宫)")),
    (HourBranch::Wu, palace(HourBranch::Shen, "Shen Palace (申宫)")),
    (HourBranch::Wei, palace(HourBranch::Wei, "Wei Palace (未宫)")),
    (HourBranch::Shen, palace(HourBranch::Wu, "Wu Palace (午宫)")),
    (HourBranch::You, palace(HourBranch::Si, "Si Palace (巳宫)")),
    (HourBranch::Xu, palace(HourBranch::Chen, "Chen Palace (辰宫)")),
    (HourBranch::Hai, palace(HourBranch::Mao, "Mao Palace (卯宫)")),
];

const fn palace(branch: HourBranch, label: &'static str) -> LifePalace {
    LifePalace { branch, label }
}

/// # Errors
/// Returns `FortuneError::UndefinedMapping` for female-like charts, which
/// have no table yet.
pub fn life_palace(branch: HourBranch, gender: Gender) -> Result<LifePalace, FortuneError> {
    match gender {
        Gender::MaleLike => MALE_PALACE_TABLE
            .iter()
            .find(|(from, _)| *from == branch)
            .map(|(_, palace)| *palace)
            .ok_or(FortuneError::UndefinedMapping { gender }),
        // TODO: needs a product decision on the female-like palace table.
        Gender::FemaleLike => Err(FortuneError::UndefinedMapping { gender }),
    }
}

/// Outcome of a palace lookup as reported to callers: either a label, or an
/// explicit marker that no mapping exists for the chart's gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PalaceReading {
    Defined { palace: LifePalace },
    Undefined { gender: Gender, reason: String },
}

impl PalaceReading {
    /// Turns `UndefinedMapping` into a structured result; every other error
    /// is passed through.
    ///
    /// # Errors
    /// Any `FortuneError` other than `UndefinedMapping`.
    pub fn from_lookup(lookup: Result<LifePalace, FortuneError>) -> Result<Self, FortuneError> {
        match lookup {
            Ok(palace) => Ok(Self::Defined { palace }),
            Err(err @ FortuneError::UndefinedMapping { gender }) => Ok(Self::Undefined {
                gender,
                reason: err.to_string(),
            }),
            Err(err) => Err(err),
        }
    }

    pub const fn palace(&self) -> Option<LifePalace> {
        match self {
            Self::Defined { palace } => Some(*palace),
            Self::Undefined { .. } => None,
        }
    }
}

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use serde::Deserialize;

use crate::auspicious::{LuckyDayPolicy, SearchWindows};
use crate::calendar::DateFormats;
use crate::numerology::LuckyNumberPolicy;
use crate::types::BirthHour;
use crate::{
    DEFAULT_LUCKY_COUNT, DEFAULT_OFFSET_WINDOW_DAYS, DEFAULT_PARTNER_WINDOW_DAYS, DEFAULT_SCAN_DAYS,
    LUCKY_NUMBER_MAX, MAX_WINDOW_DAYS,
};

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("lucky_number_count must be 1-{max}, got {0}", max = LUCKY_NUMBER_MAX)]
    LuckyCount(usize),

    #[error("{key} must be 1-{max} days, got {value}", max = MAX_WINDOW_DAYS)]
    Window { key: &'static str, value: u32 },
}

/// Tunables for a [`crate::FortuneEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub lucky_number_count:  usize,
    pub lucky_number_policy: LuckyNumberPolicy,
    pub lucky_day_policy:    LuckyDayPolicy,
    pub offset_window_days:  u32,
    pub scan_days:           u32,
    pub partner_window_days: u32,
    pub date_formats:        DateFormats,
    /// Hour assumed when a request carries no birth time. With `None`, such
    /// requests get no hour branch or life palace.
    pub default_hour:        Option<BirthHour>,
    pub partner_day:         bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lucky_number_count:  DEFAULT_LUCKY_COUNT,
            lucky_number_policy: LuckyNumberPolicy::default(),
            lucky_day_policy:    LuckyDayPolicy::default(),
            offset_window_days:  DEFAULT_OFFSET_WINDOW_DAYS,
            scan_days:           DEFAULT_SCAN_DAYS,
            partner_window_days: DEFAULT_PARTNER_WINDOW_DAYS,
            date_formats:        DateFormats::default(),
            default_hour:        None,
            partner_day:         true,
        }
    }
}

impl EngineConfig {
    /// Loads `.env` if present, then reads `FORTUNE_*` variables over the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` for unparsable or out of range values.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    /// Returns `ConfigError` for unparsable or out of range values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "FORTUNE_LUCKY_COUNT")? {
            config.lucky_number_count = v;
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_LUCKY_NUMBER_POLICY")? {
            config.lucky_number_policy = v;
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_LUCKY_DAY_POLICY")? {
            config.lucky_day_policy = v;
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_OFFSET_WINDOW_DAYS")? {
            config.offset_window_days = v;
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_SCAN_DAYS")? {
            config.scan_days = v;
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_PARTNER_WINDOW_DAYS")? {
            config.partner_window_days = v;
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_DATE_FORMATS")? {
            config.date_formats = v;
        }
        if let Some(hour) = parse_var::<u8, _>(&lookup, "FORTUNE_DEFAULT_HOUR")? {
            let hour = BirthHour::new(hour).map_err(|e| ConfigError::InvalidValue {
                key:     "FORTUNE_DEFAULT_HOUR",
                message: e.to_string(),
            })?;
            config.default_hour = Some(hour);
        }
        if let Some(v) = parse_var(&lookup, "FORTUNE_PARTNER_DAY")? {
            config.partner_day = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns the first out of range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=usize::from(LUCKY_NUMBER_MAX)).contains(&self.lucky_number_count) {
            return Err(ConfigError::LuckyCount(self.lucky_number_count));
        }
        for (key, value) in [
            ("offset_window_days", self.offset_window_days),
            ("scan_days", self.scan_days),
            ("partner_window_days", self.partner_window_days),
        ] {
            if !(1..=MAX_WINDOW_DAYS).contains(&value) {
                return Err(ConfigError::Window { key, value });
            }
        }
        Ok(())
    }

    pub const fn windows(&self) -> SearchWindows {
        SearchWindows {
            offset_days:  self.offset_window_days,
            scan_days:    self.scan_days,
            partner_days: self.partner_window_days,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key,
                message: e.to_string(),
            })
        })
        .transpose()
}

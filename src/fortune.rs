//! Composes the individual readings into one [`FortuneRecord`].
//!
//! Validation happens once, at the parsing boundary. After that every
//! sub-computation either succeeds or the whole call fails with the
//! originating error; no partial record is ever returned.

use serde::{Deserialize, Serialize};

use crate::auspicious::{lucky_day, partner_match_day};
use crate::branch::{HourBranch, PalaceReading, hour_branch, life_palace};
use crate::calendar::{CalendarDate, parse_date, parse_hour};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, EngineConfig};
use crate::numerology::{LifePath, life_path, lucky_numbers_with};
use crate::types::{BirthHour, Gender};
use crate::zodiac::{ZodiacSign, zodiac};
use crate::{FortuneError, ParseError};

/// Raw request fields, as an HTTP form or JSON body would carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FortuneRequest {
    pub dob:    Option<String>,
    #[serde(default)]
    pub time:   Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl FortuneRequest {
    pub fn new(dob: impl Into<String>) -> Self {
        Self {
            dob: Some(dob.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

/// A validated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthInput {
    pub date:   CalendarDate,
    pub hour:   Option<BirthHour>,
    pub gender: Option<Gender>,
}

impl BirthInput {
    /// Validates every field of `request`. Blank optional fields count as absent.
    ///
    /// # Errors
    /// - `InvalidDateFormat` if `dob` is missing or matches none of the configured formats
    /// - `InvalidHour` if `time` is present but malformed or out of range
    /// - `InvalidGender` if `gender` is present but unrecognized
    pub fn parse(request: &FortuneRequest, config: &EngineConfig) -> Result<Self, FortuneError> {
        let raw_dob = request.dob.as_deref().ok_or(ParseError::EmptyInput)?;
        let date = parse_date(raw_dob, config.date_formats.formats())?;
        let hour = present(request.time.as_deref()).map(parse_hour).transpose()?;
        let gender = present(request.gender.as_deref()).map(str::parse).transpose()?;
        Ok(Self { date, hour, gender })
    }
}

fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

/// The aggregate reading for one birthdate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneRecord {
    pub zodiac:            ZodiacSign,
    pub personality:       &'static str,
    pub life_path:         LifePath,
    pub life_path_meaning: &'static str,
    pub lucky_numbers:     Vec<u8>,
    pub lucky_day:         CalendarDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lucky_day_score:   Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_match_day: Option<CalendarDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_branch:       Option<HourBranch>,
    /// The branch character, e.g. `辰`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_branch_hanzi: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_palace:       Option<PalaceReading>,
}

/// Builds a record for `input` as seen on `today`.
///
/// When the input has no hour, `config.default_hour` is used; with neither,
/// the record carries no hour branch or life palace. A missing gender reads
/// as male-like.
///
/// # Errors
/// Returns `FortuneError::DateOutOfRange` if a date search steps past year 9999.
pub fn aggregate(input: &BirthInput, today: CalendarDate, config: &EngineConfig) -> Result<FortuneRecord, FortuneError> {
    let birth = &input.date;
    let sign = zodiac(birth.month(), birth.day());
    let path = life_path(birth);
    let numbers = lucky_numbers_with(birth, config.lucky_number_count, config.lucky_number_policy);

    let windows = config.windows();
    let day = lucky_day(birth, today, config.lucky_day_policy, windows)?;
    let partner = if config.partner_day {
        Some(partner_match_day(birth, today, windows.partner_days)?)
    } else {
        None
    };

    let (branch, palace) = match input.hour.or(config.default_hour) {
        Some(hour) => {
            let branch = hour_branch(u32::from(hour.get()))?;
            let gender = input.gender.unwrap_or_default();
            let reading = PalaceReading::from_lookup(life_palace(branch, gender))?;
            (Some(branch), Some(reading))
        },
        None => (None, None),
    };

    tracing::debug!(
        %birth,
        %today,
        zodiac = %sign.sign,
        zodiac_span = %sign.sign.span(),
        life_path = %path,
        branch = ?branch,
        "computed fortune"
    );

    Ok(FortuneRecord {
        zodiac:            sign.sign,
        personality:       sign.personality,
        life_path:         path,
        life_path_meaning: path.meaning(),
        lucky_numbers:     numbers,
        lucky_day:         day.date,
        lucky_day_score:   day.score,
        partner_match_day: partner,
        hour_branch:       branch,
        hour_branch_hanzi: branch.map(HourBranch::hanzi),
        life_palace:       palace,
    })
}

/// Entry point for callers: validated configuration plus a source of "today".
#[derive(Debug, Clone)]
pub struct FortuneEngine<C = SystemClock> {
    config: EngineConfig,
    clock:  C,
}

impl FortuneEngine<SystemClock> {
    /// # Errors
    /// Returns `ConfigError` if `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> FortuneEngine<C> {
    /// # Errors
    /// Returns `ConfigError` if `config` fails validation.
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses and computes in one step.
    ///
    /// # Errors
    /// Any validation error from [`BirthInput::parse`], or an error from [`Self::compute`].
    pub fn fortune(&self, request: &FortuneRequest) -> Result<FortuneRecord, FortuneError> {
        let input = BirthInput::parse(request, &self.config)?;
        self.compute(&input)
    }

    /// Reads the clock once and aggregates.
    ///
    /// # Errors
    /// Returns `FortuneError::DateOutOfRange` if the clock or a date search
    /// lands past year 9999.
    pub fn compute(&self, input: &BirthInput) -> Result<FortuneRecord, FortuneError> {
        let today = CalendarDate::try_from(self.clock.today())?;
        aggregate(input, today, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auspicious::LuckyDayPolicy;
    use crate::calendar::DateFormats;
    use crate::clock::FixedClock;
    use crate::test_utils::{date, fixed_engine};

    fn record(request: &FortuneRequest) -> FortuneRecord {
        fixed_engine(EngineConfig::default()).fortune(request).unwrap()
    }

    #[test]
    fn test_reference_chart() {
        let today = date(2026, 10, 16);
        let result = record(&FortuneRequest::new("1990-01-08").with_time("8").with_gender("male"));

        assert_eq!(result.zodiac, ZodiacSign::Capricorn);
        assert_eq!(result.personality, ZodiacSign::Capricorn.personality());
        assert_eq!(result.life_path.get(), 1);
        assert_eq!(result.life_path_meaning, result.life_path.meaning());
        assert_eq!(result.hour_branch, Some(HourBranch::Chen));
        assert_eq!(
            result.life_palace.as_ref().and_then(PalaceReading::palace).map(|p| p.label),
            Some("Xu Palace (戌宫)")
        );

        assert_eq!(result.lucky_numbers.len(), 6);
        assert!(result.lucky_numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(result.lucky_numbers.iter().all(|n| (1..=49).contains(n)));

        assert!(result.lucky_day >= today);
        assert!(result.lucky_day <= today.add_days(29).unwrap());
        assert!(result.lucky_day_score.is_some());

        let partner = result.partner_match_day.unwrap();
        assert!(partner > today);
        assert!(partner <= today.add_days(60).unwrap());
    }

    #[test]
    fn test_same_inputs_same_record() {
        let request = FortuneRequest::new("1990-01-08").with_time("08:30");
        assert_eq!(record(&request), record(&request));
    }

    #[test]
    fn test_female_chart_reports_undefined_palace() {
        let result = record(&FortuneRequest::new("1990-01-08").with_time("8").with_gender("F"));
        assert_eq!(result.hour_branch, Some(HourBranch::Chen));
        assert!(matches!(
            result.life_palace,
            Some(PalaceReading::Undefined {
                gender: Gender::FemaleLike,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_gender_reads_as_male() {
        let result = record(&FortuneRequest::new("1990-01-08").with_time("8"));
        assert!(matches!(result.life_palace, Some(PalaceReading::Defined { .. })));
    }

    #[test]
    fn test_no_hour_means_no_branch() {
        let result = record(&FortuneRequest::new("1990-01-08"));
        assert_eq!(result.hour_branch, None);
        assert_eq!(result.life_palace, None);
    }

    #[test]
    fn test_default_hour_fills_missing_time() {
        let config = EngineConfig {
            default_hour: Some(BirthHour::new(12).unwrap()),
            ..EngineConfig::default()
        };
        let engine = fixed_engine(config);

        let result = engine.fortune(&FortuneRequest::new("1990-01-08")).unwrap();
        assert_eq!(result.hour_branch, Some(HourBranch::Wu));

        let result = engine.fortune(&FortuneRequest::new("1990-01-08").with_time("23")).unwrap();
        assert_eq!(result.hour_branch, Some(HourBranch::Zi));
    }

    #[test]
    fn test_validation_errors_stop_the_call() {
        struct TestCase {
            request:  FortuneRequest,
            expected: fn(&FortuneError) -> bool,
        }

        let cases = vec![
            TestCase {
                request:  FortuneRequest::default(),
                expected: |e| matches!(e, FortuneError::InvalidDateFormat(ParseError::EmptyInput)),
            },
            TestCase {
                request:  FortuneRequest::new("1990-02-30"),
                expected: |e| matches!(e, FortuneError::InvalidDateFormat(ParseError::InvalidDay { .. })),
            },
            TestCase {
                request:  FortuneRequest::new("08/01/1990"),
                expected: |e| matches!(e, FortuneError::InvalidDateFormat(_)),
            },
            TestCase {
                request:  FortuneRequest::new("1990-01-08").with_time("24"),
                expected: |e| matches!(e, FortuneError::InvalidHour(_)),
            },
            TestCase {
                request:  FortuneRequest::new("1990-01-08").with_time("eight"),
                expected: |e| matches!(e, FortuneError::InvalidHour(_)),
            },
            TestCase {
                request:  FortuneRequest::new("1990-01-08").with_gender("robot"),
                expected: |e| matches!(e, FortuneError::InvalidGender(_)),
            },
        ];

        for case in cases {
            let err = fixed_engine(EngineConfig::default()).fortune(&case.request).unwrap_err();
            assert!((case.expected)(&err), "{:?} gave {err:?}", case.request);
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let request = FortuneRequest::new("1990-01-08").with_time("  ").with_gender("");
        let input = BirthInput::parse(&request, &EngineConfig::default()).unwrap();
        assert_eq!(input.hour, None);
        assert_eq!(input.gender, None);
    }

    #[test]
    fn test_flexible_formats() {
        let config = EngineConfig {
            date_formats: DateFormats::Flexible,
            ..EngineConfig::default()
        };
        let input = BirthInput::parse(&FortuneRequest::new("08/01/1990"), &config).unwrap();
        assert_eq!(input.date, date(1990, 1, 8));
    }

    #[test]
    fn test_request_from_json() {
        let request: FortuneRequest =
            serde_json::from_str(r#"{ "dob": "1990-01-08", "time": "08:00", "gender": "male" }"#).unwrap();
        assert_eq!(request, FortuneRequest::new("1990-01-08").with_time("08:00").with_gender("male"));

        let request: FortuneRequest = serde_json::from_str(r#"{ "dob": "1990-01-08" }"#).unwrap();
        assert_eq!(request.time, None);
    }

    #[test]
    fn test_record_json_shape() {
        let value = serde_json::to_value(record(&FortuneRequest::new("1990-01-08").with_time("8"))).unwrap();
        assert_eq!(value["zodiac"], "Capricorn");
        assert_eq!(value["life_path"], 1);
        assert_eq!(value["hour_branch"], "Chen");
        assert_eq!(value["hour_branch_hanzi"], "辰");
        assert_eq!(value["life_palace"]["palace"], "Xu Palace (戌宫)");
        assert!(value["lucky_day"].as_str().unwrap().starts_with("2026-"));
        assert_eq!(value["lucky_numbers"].as_array().unwrap().len(), 6);

        let value = serde_json::to_value(record(&FortuneRequest::new("1990-01-08"))).unwrap();
        assert!(value.get("hour_branch").is_none());
        assert!(value.get("hour_branch_hanzi").is_none());
        assert!(value.get("life_palace").is_none());
    }

    #[test]
    fn test_offset_policy_and_no_partner_day() {
        let config = EngineConfig {
            lucky_day_policy: LuckyDayPolicy::SeededOffset,
            partner_day: false,
            ..EngineConfig::default()
        };
        let result = fixed_engine(config).fortune(&FortuneRequest::new("1990-01-08")).unwrap();
        assert_eq!(result.lucky_day_score, None);
        assert_eq!(result.partner_match_day, None);
        assert!(result.lucky_day > date(2026, 10, 16));
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EngineConfig {
            lucky_number_count: 0,
            ..EngineConfig::default()
        };
        let clock = FixedClock(date(2026, 10, 16).naive());
        assert_eq!(FortuneEngine::with_clock(config, clock).unwrap_err(), ConfigError::LuckyCount(0));
    }

    #[test]
    fn test_clock_past_supported_range() {
        let clock = FixedClock(chrono::NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap());
        let engine = FortuneEngine::with_clock(EngineConfig::default(), clock).unwrap();
        let err = engine.fortune(&FortuneRequest::new("1990-01-08")).unwrap_err();
        assert_eq!(err, FortuneError::DateOutOfRange);
    }
}

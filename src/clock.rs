use chrono::{Local, NaiveDate};

/// Source of "today" for the forward date searches.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let clock = FixedClock(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), clock.today());
    }

    #[test]
    fn test_system_clock_is_plausible() {
        let today = SystemClock.today();
        assert!(today > NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }
}

use crate::calendar::CalendarDate;
use crate::clock::FixedClock;
use crate::config::EngineConfig;
use crate::fortune::FortuneEngine;

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).unwrap()
}

/// An engine whose "today" is pinned to 2026-10-16.
pub fn fixed_engine(config: EngineConfig) -> FortuneEngine<FixedClock> {
    FortuneEngine::with_clock(config, FixedClock(date(2026, 10, 16).naive())).unwrap()
}

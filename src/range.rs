use crate::prelude::*;

/// Inclusive membership test that understands ranges wrapping past the end
/// of a cycle.
///
/// With `start <= end` this is the ordinary `start <= value <= end`. With
/// `start > end` (23 to 0 on a clock face, December to January on a
/// calendar) the range is the union of `[start, max]` and `[min, end]`.
pub fn in_wrapping_range<T: PartialOrd>(value: T, start: T, end: T) -> bool {
    if start <= end {
        start <= value && value <= end
    } else {
        value >= start || value <= end
    }
}

/// A `(month, day)` pair without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{month:02}-{day:02}")]
pub struct MonthDay {
    pub month: u8,
    pub day:   u8,
}

impl MonthDay {
    pub const fn new(month: u8, day: u8) -> Self {
        Self { month, day }
    }
}

/// An inclusive span of the year whose endpoints sit in two months.
///
/// Membership is decided by month first: a date belongs to the span when it
/// falls in the start month on or after the start day, or in the end month
/// on or before the end day. Spans crossing New Year (Dec 22 to Jan 19) need
/// no special casing under this rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct MonthDaySpan {
    start: MonthDay,
    end:   MonthDay,
}

impl MonthDaySpan {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> MonthDay {
        self.start
    }

    pub const fn end(&self) -> MonthDay {
        self.end
    }

    /// True if the span crosses the year boundary
    pub const fn wraps(&self) -> bool {
        self.start.month > self.end.month
    }

    pub const fn contains(&self, month: u8, day: u8) -> bool {
        (month == self.start.month && day >= self.start.day) || (month == self.end.month && day <= self.end.day)
    }
}

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{MONTH_NAMES, prelude::*};

/// A month and day with no year attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{month}/{day}")]
pub struct MonthDay {
    month: u8,
    day:   u8,
}

impl MonthDay {
    const fn new(month: u8, day: u8) -> Self {
        Self { month, day }
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Long form, e.g. "March 21"
    pub fn describe(&self) -> String {
        let name = MONTH_NAMES
            .get(usize::from(self.month).saturating_sub(1))
            .copied()
            .unwrap_or("?");
        format!("{name} {}", self.day)
    }
}

/// Inclusive range of days spanning two consecutive months.
/// When `start.month > end.month` the range wraps the year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayRange {
    start: MonthDay,
    end:   MonthDay,
}

impl DayRange {
    /// Builds a range for the static sign table; the table is checked by tests,
    /// not at construction.
    pub(crate) const fn new(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Self {
        Self {
            start: MonthDay::new(start_month, start_day),
            end:   MonthDay::new(end_month, end_day),
        }
    }

    /// Returns the first day of the range
    pub const fn start(&self) -> MonthDay {
        self.start
    }

    /// Returns the last day of the range (inclusive)
    pub const fn end(&self) -> MonthDay {
        self.end
    }

    /// Whether the range crosses from December into January
    pub const fn wraps_year(&self) -> bool {
        self.start.month > self.end.month
    }

    /// Checks whether `month`/`day` falls inside the range.
    /// Only the start and end months are consulted, so this holds for the
    /// two-month spans every sign covers, wrapping or not.
    pub const fn contains(&self, month: u8, day: u8) -> bool {
        (month == self.start.month && day >= self.start.day)
            || (month == self.end.month && day <= self.end.day)
    }

    /// Long form, e.g. "December 22 - January 19"
    pub fn describe(&self) -> String {
        format!("{} - {}", self.start.describe(), self.end.describe())
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl Serialize for DayRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

mod consts;
mod prelude;
mod range;
mod types;

pub mod api;
pub mod fortune;
pub mod matching;
pub mod parser;
pub mod sign;

pub use consts::*;
pub use fortune::{Fortune, generate_fortune};
pub use matching::{
    LookupError, MatchKind, SignMatch, find_sign, levenshtein_distance, resolve_by_name_or_alias,
};
pub use parser::{parse_date_string, validate_components, validate_day, validate_month, validate_year};
pub use range::{DayRange, MonthDay};
pub use sign::{Element, ZodiacSign, resolve_by_date, zodiac_signs};
pub use types::{Day, Month, Year, days_in_month, is_leap_year, is_valid_calendar_date};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated birth date. The year is optional; without it February 29 is
/// accepted, since the date could fall in a leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateParts", into = "DateParts")]
pub struct DateInput {
    month: Month,
    day:   Day,
    year:  Option<Year>,
}

/// Result of parsing a free-form date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedDate {
    /// Month and day, optionally a year
    Full(DateInput),
    /// A bare month name, only useful to the component-entry flow
    MonthOnly(Month),
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date input")]
    EmptyInput,
    #[display(fmt = "Unrecognized date format: {_0}")]
    UnrecognizedFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    MonthOutOfRange(i64),
    #[display(fmt = "Invalid date: {} {}", "month.name()", day)]
    DayOutOfRange {
        month: Month,
        day:   i64,
        year:  Option<Year>,
    },
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    YearOutOfRange(i64),
    #[display(fmt = "Not a number: {_0}")]
    NotANumber(String),
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Stable machine-readable code for API clients
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::UnrecognizedFormat(_) => "UNRECOGNIZED_FORMAT",
            Self::MonthOutOfRange(_) => "MONTH_OUT_OF_RANGE",
            Self::DayOutOfRange { .. } => "DAY_OUT_OF_RANGE_FOR_MONTH",
            Self::YearOutOfRange(_) => "YEAR_OUT_OF_RANGE",
            Self::NotANumber(_) => "NOT_A_NUMBER",
        }
    }

    /// A hint telling the user how to correct the input
    pub fn suggestion(&self) -> String {
        match self {
            Self::EmptyInput | Self::UnrecognizedFormat(_) => {
                "Try 12/25/1990, 25/12/1990, 1990-12-25, December 25, 1990 or 25 December 1990"
                    .to_owned()
            }
            Self::MonthOutOfRange(_) => {
                format!("Month must be between 1 and {MAX_MONTH}, or a month name")
            }
            Self::DayOutOfRange { month, year, .. } => match (month.get(), year) {
                (FEBRUARY, None) => "February has 28 days (29 in leap years)".to_owned(),
                (FEBRUARY, Some(year)) if !year.is_leap() => {
                    format!("February has 28 days in {year}")
                }
                _ => format!("{} has {} days", month.name(), month.max_days(*year)),
            },
            Self::YearOutOfRange(_) => format!("Year must be between 1 and {MAX_YEAR}"),
            Self::NotANumber(_) => "Enter the value using digits, e.g. 25".to_owned(),
        }
    }
}

impl DateInput {
    /// Creates a validated date from raw numbers
    ///
    /// # Errors
    /// Returns the first failing component: month, then year, then day.
    pub fn new(month: u8, day: u8, year: Option<u16>) -> Result<Self, ParseError> {
        Self::from_numbers(
            i64::from(month),
            i64::from(day),
            year.map(i64::from),
        )
    }

    pub(crate) fn from_numbers(
        month: i64,
        day: i64,
        year: Option<i64>,
    ) -> Result<Self, ParseError> {
        let month = Month::from_number(month)?;
        let year = year.map(Year::from_number).transpose()?;
        let day = Day::from_number(day, month, year)?;
        Ok(Self { month, day, year })
    }

    pub(crate) const fn from_parts(month: Month, day: Day, year: Option<Year>) -> Self {
        Self { month, day, year }
    }

    /// Returns the month as u8
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day as u8
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the year if one was given
    pub fn year(&self) -> Option<u16> {
        self.year.map(Year::get)
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    pub const fn year_typed(&self) -> Option<Year> {
        self.year
    }

    /// The sign this date falls under
    pub fn zodiac_sign(&self) -> &'static ZodiacSign {
        resolve_by_date(self.month, self.day)
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(
                f,
                "{:04}-{:02}-{:02}",
                year.get(),
                self.month.get(),
                self.day.get()
            ),
            None => write!(f, "--{:02}-{:02}", self.month.get(), self.day.get()),
        }
    }
}

impl FromStr for DateInput {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date_string(s)?.into_full()
    }
}

impl ParsedDate {
    /// Returns the month, present in both forms
    pub const fn month(&self) -> Month {
        match self {
            Self::Full(date) => date.month,
            Self::MonthOnly(month) => *month,
        }
    }

    /// Returns the full date, or an error for a bare month
    ///
    /// # Errors
    /// Returns `ParseError::UnrecognizedFormat` for `MonthOnly`.
    pub fn into_full(self) -> Result<DateInput, ParseError> {
        match self {
            Self::Full(date) => Ok(date),
            Self::MonthOnly(month) => Err(ParseError::UnrecognizedFormat(format!(
                "{} is missing a day",
                month.name()
            ))),
        }
    }
}

impl FromStr for ParsedDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date_string(s)
    }
}

/// Serialized shape of a `DateInput`: plain numbers, validated on the way in.
#[derive(Serialize, Deserialize)]
struct DateParts {
    month: u8,
    day:   u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year:  Option<u16>,
}

impl TryFrom<DateParts> for DateInput {
    type Error = ParseError;

    fn try_from(parts: DateParts) -> Result<Self, Self::Error> {
        Self::new(parts.month, parts.day, parts.year)
    }
}

impl From<DateInput> for DateParts {
    fn from(date: DateInput) -> Self {
        Self {
            month: date.month(),
            day:   date.day(),
            year:  date.year(),
        }
    }
}

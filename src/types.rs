use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY,
    LEAP_YEAR_CYCLE, MAX_DAY, MAX_MONTH, MAX_YEAR, MIN_DAY, MONTH_LOOKUP, MONTH_NAMES,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero =
            NonZeroU16::new(value).ok_or(ParseError::YearOutOfRange(i64::from(value)))?;
        if value > MAX_YEAR {
            return Err(ParseError::YearOutOfRange(i64::from(value)));
        }
        Ok(Self(non_zero))
    }

    pub(crate) fn from_number(value: i64) -> Result<Self, ParseError> {
        u16::try_from(value)
            .map_err(|_| ParseError::YearOutOfRange(value))
            .and_then(Self::new)
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this is a Gregorian leap year
    pub fn is_leap(self) -> bool {
        is_leap_year(i64::from(self.get()))
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::MonthOutOfRange` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero =
            NonZeroU8::new(value).ok_or(ParseError::MonthOutOfRange(i64::from(value)))?;
        if value > MAX_MONTH {
            return Err(ParseError::MonthOutOfRange(i64::from(value)));
        }
        Ok(Self(non_zero))
    }

    pub(crate) fn from_number(value: i64) -> Result<Self, ParseError> {
        u8::try_from(value)
            .map_err(|_| ParseError::MonthOutOfRange(value))
            .and_then(Self::new)
    }

    /// Looks up a month by full name or abbreviation ("sept" included), ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        MONTH_LOOKUP
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .and_then(|&(_, number)| Self::new(number).ok())
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Canonical English name, e.g. "February"
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[(self.get() - JANUARY) as usize]
    }

    /// Length of this month; February counts 29 days when the year is unknown
    pub fn max_days(self, year: Option<Year>) -> u8 {
        days_in_month(self, year)
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given month and optional year
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the month and, when known, the year
    ///
    /// # Errors
    /// Returns `ParseError::DayOutOfRange` if the value is 0 or past the end of the month.
    pub fn new(value: u8, month: Month, year: Option<Year>) -> Result<Self, ParseError> {
        Self::from_number(i64::from(value), month, year)
    }

    pub(crate) fn from_number(
        value: i64,
        month: Month,
        year: Option<Year>,
    ) -> Result<Self, ParseError> {
        let out_of_range = || ParseError::DayOutOfRange {
            month,
            day: value,
            year,
        };
        if !is_valid_calendar_date(
            i64::from(month.get()),
            value,
            year.map(|y| i64::from(y.get())),
        ) {
            return Err(out_of_range());
        }
        u8::try_from(value)
            .ok()
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or_else(out_of_range)
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in `month`. An unknown year is treated as a potential leap year.
pub fn days_in_month(month: Month, year: Option<Year>) -> u8 {
    month_length(month.get(), year.map(|y| i64::from(y.get())))
}

// `month` must already be in 1..=12.
const fn month_length(month: u8, year: Option<i64>) -> u8 {
    if month == FEBRUARY {
        match year {
            Some(year) if !is_leap_year(year) => DAYS_IN_MONTH[FEBRUARY as usize],
            _ => FEBRUARY_DAYS_LEAP,
        }
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Checks that `month`/`day` name a real calendar day, honouring leap years
/// when `year` is given and allowing February 29 when it is not.
pub fn is_valid_calendar_date(month: i64, day: i64, year: Option<i64>) -> bool {
    let Ok(month) = u8::try_from(month) else {
        return false;
    };
    if !(JANUARY..=MAX_MONTH).contains(&month) {
        return false;
    }
    if !(i64::from(MIN_DAY)..=i64::from(MAX_DAY)).contains(&day) {
        return false;
    }
    day <= i64::from(month_length(month, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(ParseError::YearOutOfRange(0))));
        assert!(matches!(
            Year::new(10000),
            Err(ParseError::YearOutOfRange(10000))
        ));
        assert!(matches!(
            Year::from_number(-4),
            Err(ParseError::YearOutOfRange(-4))
        ));
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ParseError::MonthOutOfRange(0))));
        assert!(matches!(
            Month::new(13),
            Err(ParseError::MonthOutOfRange(13))
        ));
        assert!(matches!(
            Month::from_number(300),
            Err(ParseError::MonthOutOfRange(300))
        ));
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(Month::from_name("December"), Some(Month::new(12).unwrap()));
        assert_eq!(Month::from_name("dec"), Some(Month::new(12).unwrap()));
        assert_eq!(Month::from_name("SEPT"), Some(Month::new(9).unwrap()));
        assert_eq!(Month::from_name("sep"), Some(Month::new(9).unwrap()));
        assert_eq!(Month::from_name("may"), Some(Month::new(5).unwrap()));
        assert_eq!(Month::from_name("decem"), None);
        assert_eq!(Month::from_name(""), None);
    }

    #[test]
    fn test_month_name_and_display() {
        let month = Month::new(2).unwrap();
        assert_eq!(month.name(), "February");
        assert_eq!(month.to_string(), "2");
        assert_eq!(Month::new(12).unwrap().name(), "December");
    }

    #[test]
    fn test_month_max_days() {
        let feb = Month::new(2).unwrap();
        assert_eq!(feb.max_days(None), 29);
        assert_eq!(feb.max_days(Some(Year::new(2023).unwrap())), 28);
        assert_eq!(feb.max_days(Some(Year::new(2024).unwrap())), 29);
        assert_eq!(Month::new(6).unwrap().max_days(None), 30);
    }

    #[test]
    fn test_day_new_valid() {
        let jan = Month::new(1).unwrap();
        let feb = Month::new(2).unwrap();
        let apr = Month::new(4).unwrap();
        let y2023 = Some(Year::new(2023).unwrap());
        let y2024 = Some(Year::new(2024).unwrap());

        // January - 31 days
        assert!(Day::new(1, jan, y2024).is_ok());
        assert!(Day::new(31, jan, y2024).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, feb, y2023).is_ok());
        assert!(Day::new(29, feb, y2023).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, feb, y2024).is_ok());
        assert!(Day::new(30, feb, y2024).is_err());

        // February, year unknown - permissive
        assert!(Day::new(29, feb, None).is_ok());
        assert!(Day::new(30, feb, None).is_err());

        // April - 30 days
        assert!(Day::new(30, apr, None).is_ok());
        assert!(Day::new(31, apr, None).is_err());
    }

    #[test]
    fn test_day_new_invalid_carries_context() {
        let jan = Month::new(1).unwrap();
        let result = Day::new(32, jan, None);
        assert!(matches!(
            result,
            Err(ParseError::DayOutOfRange {
                day: 32,
                year: None,
                ..
            })
        ));
        assert!(matches!(
            Day::new(0, jan, None),
            Err(ParseError::DayOutOfRange { day: 0, .. })
        ));
    }

    #[test]
    fn test_day_serializes_as_number() {
        let day = Day::new(15, Month::new(8).unwrap(), None).unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "15");
        assert_eq!(day.to_string(), "15");
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i64,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2020,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 2400,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({}): expected {}",
                case.year,
                case.description,
                if case.is_leap {
                    "leap year"
                } else {
                    "not leap year"
                }
            );
        }
    }

    #[test]
    fn test_days_in_month_fixed_lengths() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            let typed = Month::new(month).unwrap();
            assert_eq!(days_in_month(typed, None), 31, "Month {month}");
        }
        for month in [4, 6, 9, 11] {
            let typed = Month::new(month).unwrap();
            assert_eq!(days_in_month(typed, None), 30, "Month {month}");
        }
    }

    #[test]
    fn test_days_in_month_february() {
        let february = Month::new(2).unwrap();
        assert_eq!(days_in_month(february, None), 29);
        assert_eq!(days_in_month(february, Some(Year::new(2023).unwrap())), 28);
        assert_eq!(days_in_month(february, Some(Year::new(1900).unwrap())), 28);
        assert_eq!(days_in_month(february, Some(Year::new(2000).unwrap())), 29);
    }

    #[test]
    fn test_days_in_month_only_takes_real_months() {
        assert!(Month::new(0).is_err());
        assert!(Month::new(13).is_err());
        for month in 1..=MAX_MONTH {
            let days = days_in_month(Month::new(month).unwrap(), None);
            assert!((28..=31).contains(&days), "Month {month}");
        }
    }

    #[test]
    fn test_is_valid_calendar_date_leap_rules() {
        assert!(is_valid_calendar_date(2, 29, Some(2000)));
        assert!(!is_valid_calendar_date(2, 29, Some(1900)));
        assert!(is_valid_calendar_date(2, 29, Some(2024)));
        assert!(is_valid_calendar_date(2, 29, None));
        for year in [None, Some(2000), Some(2023), Some(2024)] {
            assert!(!is_valid_calendar_date(2, 30, year));
        }
    }

    #[test]
    fn test_is_valid_calendar_date_ranges() {
        assert!(!is_valid_calendar_date(6, 31, None));
        assert!(!is_valid_calendar_date(13, 1, None));
        assert!(!is_valid_calendar_date(0, 15, None));
        assert!(!is_valid_calendar_date(-1, 15, None));
        assert!(!is_valid_calendar_date(1, 0, None));
        assert!(!is_valid_calendar_date(1, 32, None));
        assert!(!is_valid_calendar_date(i64::MAX, 1, None));
        assert!(is_valid_calendar_date(1, 31, None));
        assert!(is_valid_calendar_date(4, 30, None));
        assert!(is_valid_calendar_date(12, 31, Some(1999)));
    }
}

//! Free-form and component-wise birth date parsing.
//!
//! Accepted full-date forms, tried in this order:
//! - ISO: `1990-12-25`
//! - Numeric with `/` or `-`: `12/25/1990` (US order), falling back to
//!   `25/12/1990` (European order) when the US reading is not a real date
//! - Month name first: `December 25, 1990`, `dec 25 90`, `Dec. 25th`
//! - Day first: `25 December 1990`, `25th dec`
//! - A bare month name: `december` (partial result)
//!
//! The first candidate that is a real calendar date wins. When none is, the
//! error of the first candidate is reported.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::{
    CENTURY_1900, CENTURY_2000, DATE_SEPARATORS, DateInput, Day, MAX_SEPARATORS, Month,
    ParseError, ParsedDate, TWO_DIGIT_YEAR_PIVOT, Year,
};

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(DatePatterns::new)
}

struct DatePatterns {
    iso:       Regex,
    numeric:   Regex,
    month_day: Regex,
    day_month: Regex,
}

impl DatePatterns {
    #[allow(clippy::expect_used)]
    fn new() -> Self {
        Self {
            // 1990-12-25
            iso:       Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("iso pattern"),
            // 12/25/1990, 25-12-90
            numeric:   Regex::new(r"^([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{2,4})$")
                .expect("numeric pattern"),
            // december 25, 1990 / dec. 25th 90
            month_day: Regex::new(
                r"^([a-z]+)\.?\s+([0-9]{1,2})(?:st|nd|rd|th)?(?:(?:\s*,\s*|\s+)([0-9]{2,4}))?$",
            )
            .expect("month-day pattern"),
            // 25 december 1990 / 25th dec, 90
            day_month: Regex::new(
                r"^([0-9]{1,2})(?:st|nd|rd|th)?\s+([a-z]+)\.?(?:(?:\s*,\s*|\s+)([0-9]{2,4}))?$",
            )
            .expect("day-month pattern"),
        }
    }
}

/// A structurally matched reading of the input, not yet calendar-checked.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    month: i64,
    day:   i64,
    year:  Option<i64>,
}

impl Candidate {
    fn validate(self) -> Result<DateInput, ParseError> {
        DateInput::from_numbers(self.month, self.day, self.year)
    }
}

/// Parses a free-form date string.
///
/// # Errors
/// - `EmptyInput` for blank input
/// - `UnrecognizedFormat` when no format matches or separators are excessive
/// - the calendar error of the first matching reading when none is a real date
pub fn parse_date_string(input: &str) -> Result<ParsedDate, ParseError> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    for separator in DATE_SEPARATORS {
        let count = normalized.matches(separator).count();
        if count > MAX_SEPARATORS {
            return Err(ParseError::UnrecognizedFormat(format!(
                "Too many {separator} separators: expected at most {MAX_SEPARATORS}, found {count}"
            )));
        }
    }

    let candidates = candidates(&normalized);
    let mut first_error = None;
    for candidate in candidates {
        match candidate.validate() {
            Ok(date) => return Ok(ParsedDate::Full(date)),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    if let Some(err) = first_error {
        return Err(err);
    }

    Month::from_name(&normalized)
        .map(ParsedDate::MonthOnly)
        .ok_or(ParseError::UnrecognizedFormat(normalized))
}

/// Every reading of `input`, in priority order.
fn candidates(input: &str) -> Vec<Candidate> {
    let patterns = patterns();
    let mut found = Vec::new();

    if let Some(caps) = patterns.iso.captures(input) {
        found.push(Candidate {
            month: number(&caps, 2),
            day:   number(&caps, 3),
            year:  Some(number(&caps, 1)),
        });
    }

    if let Some(caps) = patterns.numeric.captures(input) {
        let (first, second) = (number(&caps, 1), number(&caps, 2));
        let year = caps.get(3).map(|m| expand_year(m.as_str()));
        // US reading first, European as fallback
        found.push(Candidate {
            month: first,
            day: second,
            year,
        });
        found.push(Candidate {
            month: second,
            day: first,
            year,
        });
    }

    if let Some(caps) = patterns.month_day.captures(input) {
        if let Some(month) = month_number(&caps, 1) {
            found.push(Candidate {
                month,
                day: number(&caps, 2),
                year: caps.get(3).map(|m| expand_year(m.as_str())),
            });
        }
    }

    if let Some(caps) = patterns.day_month.captures(input) {
        if let Some(month) = month_number(&caps, 2) {
            found.push(Candidate {
                month,
                day: number(&caps, 1),
                year: caps.get(3).map(|m| expand_year(m.as_str())),
            });
        }
    }

    found
}

// Groups here are ASCII `[0-9]{1,4}`, so the parse always succeeds.
fn number(caps: &Captures<'_>, group: usize) -> i64 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

fn month_number(caps: &Captures<'_>, group: usize) -> Option<i64> {
    caps.get(group)
        .and_then(|m| Month::from_name(m.as_str()))
        .map(|month| i64::from(month.get()))
}

/// Expands two-digit years (00-49 → 2000s, 50-99 → 1900s); longer years are literal.
fn expand_year(digits: &str) -> i64 {
    let value: i64 = digits.parse().unwrap_or_default();
    if digits.len() > 2 {
        value
    } else {
        expand_two_digit_year(value)
    }
}

const fn expand_two_digit_year(value: i64) -> i64 {
    if value < TWO_DIGIT_YEAR_PIVOT {
        CENTURY_2000 + value
    } else {
        CENTURY_1900 + value
    }
}

fn parse_number(input: &str) -> Result<i64, ParseError> {
    input
        .parse::<i64>()
        .map_err(|_| ParseError::NotANumber(input.to_owned()))
}

/// Validates a month typed on its own: a number 1-12 or a month name.
///
/// # Errors
/// `EmptyInput`, `MonthOutOfRange`, or `NotANumber` when the text is
/// neither a number nor a month name.
pub fn validate_month(input: &str) -> Result<Month, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if let Some(month) = Month::from_name(input) {
        return Ok(month);
    }
    Month::from_number(parse_number(input)?)
}

/// Validates a day typed on its own against an already known month and year.
///
/// # Errors
/// `EmptyInput`, `NotANumber`, or `DayOutOfRange`.
pub fn validate_day(input: &str, month: Month, year: Option<Year>) -> Result<Day, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Day::from_number(parse_number(input)?, month, year)
}

/// Validates an optional year; blank input means "no year".
///
/// # Errors
/// `NotANumber` or `YearOutOfRange`.
pub fn validate_year(input: &str) -> Result<Option<Year>, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let value = parse_number(input)?;
    let digits = input.strip_prefix('+').unwrap_or(input);
    let year = if digits.len() <= 2 && (0..100).contains(&value) {
        expand_two_digit_year(value)
    } else {
        value
    };
    Year::from_number(year).map(Some)
}

/// Validates separately entered month, day and optional year.
///
/// # Errors
/// The first failing component's error, checked in month, year, day order
/// so the day can be judged against a known year.
pub fn validate_components(
    month: &str,
    day: &str,
    year: Option<&str>,
) -> Result<DateInput, ParseError> {
    let month = validate_month(month)?;
    let year = match year {
        Some(year) => validate_year(year)?,
        None => None,
    };
    let day = validate_day(day, month, year)?;
    Ok(DateInput::from_parts(month, day, year))
}

//! Built-in natural-language date-range converter
//!
//! Covers the grammar the store needs without pulling in a full
//! natural-language parser: bare years, month-year, day-month-year, and
//! explicit `"<period> to <period>"` spans.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use thiserror::Error;

use super::DateRangeConverter;

/// Parse failure for a date-range expression
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeParseError {
    #[error("unrecognized date range format: {0:?}")]
    Unrecognized(String),
    #[error("day {day} is out of range for {month} {year}")]
    DayOutOfRange { day: u32, month: u32, year: i32 },
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").unwrap())
}

fn month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)\.?\s+(\d{4})$").unwrap())
}

fn day_month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]+)\.?\s+(\d{4})$").unwrap()
    })
}

/// Natural-language date-range converter
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalDateRangeConverter;

impl NaturalDateRangeConverter {
    /// Parses one date-range expression into an inclusive `(start, end)`
    /// pair.
    ///
    /// The accepted grammar, case-insensitive, with month names matched on
    /// their first three or more letters:
    ///
    /// - `"2024"` → the whole year
    /// - `"February 2024"` / `"feb 2024"` → the whole month
    /// - `"16th Jan 2024"` / `"16 January 2024"` → a single day
    /// - `"<period> to <period>"` → start of the first, end of the second
    pub fn parse_range(&self, text: &str) -> Result<(NaiveDate, NaiveDate), DateRangeParseError> {
        let text = text.trim();

        if let Some((first, second)) = split_span(text) {
            let (start, _) = self.parse_period(first)?;
            let (_, end) = self.parse_period(second)?;
            return Ok((start, end));
        }

        self.parse_period(text)
    }

    fn parse_period(&self, text: &str) -> Result<(NaiveDate, NaiveDate), DateRangeParseError> {
        let text = text.trim();

        if year_re().is_match(text) {
            let year: i32 = text
                .parse()
                .map_err(|_| DateRangeParseError::Unrecognized(text.to_string()))?;
            let start = NaiveDate::from_ymd_opt(year, 1, 1)
                .ok_or_else(|| DateRangeParseError::Unrecognized(text.to_string()))?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)
                .ok_or_else(|| DateRangeParseError::Unrecognized(text.to_string()))?;
            return Ok((start, end));
        }

        if let Some(captures) = day_month_year_re().captures(text) {
            let day: u32 = captures[1].parse().unwrap();
            let year: i32 = captures[3].parse().unwrap();
            let month = month_from_name(&captures[2])
                .ok_or_else(|| DateRangeParseError::Unrecognized(text.to_string()))?;
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or(DateRangeParseError::DayOutOfRange { day, month, year })?;
            return Ok((date, date));
        }

        if let Some(captures) = month_year_re().captures(text) {
            let year: i32 = captures[2].parse().unwrap();
            if let Some(month) = month_from_name(&captures[1]) {
                let start = NaiveDate::from_ymd_opt(year, month, 1)
                    .ok_or_else(|| DateRangeParseError::Unrecognized(text.to_string()))?;
                return Ok((start, last_day_of_month(year, month)));
            }
        }

        Err(DateRangeParseError::Unrecognized(text.to_string()))
    }
}

impl DateRangeConverter for NaturalDateRangeConverter {
    fn convert_to_dates(&self, text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
        if text.trim().is_empty() {
            return (None, None);
        }

        match self.parse_range(text) {
            Ok((start, end)) => (Some(start), Some(end)),
            Err(_) => (None, None),
        }
    }

    fn convert_to_string(&self, start: NaiveDate, end: NaiveDate) -> String {
        if start == end {
            return format_single(start);
        }
        if full_month_range(start, end) {
            return start.format("%b %Y").to_string();
        }
        if full_year_range(start, end) {
            return start.format("%Y").to_string();
        }

        format!("{} to {}", format_single(start), format_single(end))
    }
}

/// Splits `"<period> to <period>"`, case-insensitively, on the first
/// standalone `to`.
fn split_span(text: &str) -> Option<(&str, &str)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)\s+to\s+").unwrap());

    let found = re.find(text)?;
    Some((&text[..found.start()], &text[found.end()..]))
}

fn format_single(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(&lower))
        .map(|index| index as u32 + 1)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .expect("month boundary is always representable")
}

fn full_month_range(start: NaiveDate, end: NaiveDate) -> bool {
    start.year() == end.year()
        && start.month() == end.month()
        && start.day() == 1
        && end == last_day_of_month(end.year(), end.month())
}

fn full_year_range(start: NaiveDate, end: NaiveDate) -> bool {
    start.year() == end.year()
        && start.month() == 1
        && start.day() == 1
        && end.month() == 12
        && end.day() == 31
}

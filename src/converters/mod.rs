//! Date-range conversion
//!
//! A date-range attribute is stored as two ISO dates but exposed to callers
//! as one human-readable string. The converter owns both directions of that
//! translation; the resolver only orchestrates.

mod natural;

use chrono::NaiveDate;

pub use natural::{DateRangeParseError, NaturalDateRangeConverter};

/// Converts between free-form date-range text and concrete date pairs.
///
/// Supplied by the host record, one instance per record.
pub trait DateRangeConverter: Send + Sync {
    /// Parses free-form input into a `(start, end)` pair.
    ///
    /// Blank or unparseable input yields `(None, None)`. A bare 4-digit
    /// year maps to January 1 through December 31 of that year.
    fn convert_to_dates(&self, text: &str) -> (Option<NaiveDate>, Option<NaiveDate>);

    /// Formats a date pair using this precedence:
    ///
    /// 1. equal dates → `"D MMM YYYY"`
    /// 2. exact calendar-month span → `"MMM YYYY"`
    /// 3. exact calendar-year span → `"YYYY"`
    /// 4. otherwise → `"D MMM YYYY to D MMM YYYY"`
    fn convert_to_string(&self, start: NaiveDate, end: NaiveDate) -> String;
}

//! Fixed-width calendar date format shared across the service.
//!
//! Every date on the wire and in storage is an 8-character `YYYYMMDD`
//! string with no separators and no time-of-day component.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

/// `chrono` format string for the wire/storage date format.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parses a fixed-width `YYYYMMDD` date.
///
/// ## Errors
/// Returns an error if the string is not exactly 8 digits or does not name
/// a real Gregorian calendar date.
pub fn parse_date(s: &str) -> CoreResult<NaiveDate> {
    if s.len() != 8 {
        return Err(CoreError::ParseError(format!("invalid date: {s:?}")));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| CoreError::ParseError(format!("invalid date: {s:?}")))
}

/// Formats a date into the fixed-width `YYYYMMDD` form.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The current calendar date in the server's local time.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

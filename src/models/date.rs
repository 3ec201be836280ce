//! Date tokens and calendar normalization.
//!
//! Schedule documents carry dates as text at one of two granularities:
//!
//! | Token | Granularity | Start of range | End of range |
//! |-------|-------------|----------------|--------------|
//! | `YYYY-MM` | month | first day | last day |
//! | `YYYY-MM-DD` | day | itself | itself |
//!
//! Tokens are never rejected at parse time. Anything that is not a month
//! token is treated as a full date and passed through unchanged; whether it
//! names a real calendar day is only asked when a [`NaiveDate`] is needed.
//!
//! # Rollover
//! Month-end expansion and month shifting follow native date rollover:
//! an out-of-range day or month carries into the next unit instead of
//! clamping (`2025-01-31` + 1 month = `2025-03-03`).

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Output format for full date tokens.
const DAY_FORMAT: &str = "%Y-%m-%d";

/// A textual date at month (`YYYY-MM`) or day (`YYYY-MM-DD`) granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateToken(String);

impl DateToken {
    /// Wraps a raw token. No validation is performed.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Formats a calendar date as a day-granularity token.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DAY_FORMAT).to_string())
    }

    /// The raw token text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a month-granularity token.
    #[inline]
    pub fn is_month(&self) -> bool {
        is_month_token(&self.0)
    }

    /// Expands to a full date token (see [`normalize`]).
    pub fn normalize(&self, as_end: bool) -> DateToken {
        DateToken(normalize(&self.0, as_end))
    }

    /// Resolves to a calendar date, if the normalized token names one.
    pub fn to_date(&self, as_end: bool) -> Option<NaiveDate> {
        parse_day(&normalize(&self.0, as_end))
    }

    /// The day after the end of this token's range.
    ///
    /// Unparseable tokens are returned unchanged.
    pub fn next_day(&self) -> DateToken {
        match self.to_date(true).and_then(|d| d.checked_add_days(Days::new(1))) {
            Some(next) => DateToken::from_date(next),
            None => self.clone(),
        }
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DateToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for DateToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl PartialEq<&str> for DateToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether `s` is exactly four ASCII digits, a dash, and two ASCII digits.
pub fn is_month_token(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 7
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..].iter().all(u8::is_ascii_digit)
}

/// Expands a month token to a full date token.
///
/// `YYYY-MM` becomes `YYYY-MM-01`, or `YYYY-MM-<last day>` when `as_end`.
/// The last day is taken as "day 0 of the following month", so leap years
/// and out-of-range months resolve the way a native date would. Any other
/// token is returned unchanged.
pub fn normalize(token: &str, as_end: bool) -> String {
    if !is_month_token(token) {
        return token.to_string();
    }
    if !as_end {
        return format!("{token}-01");
    }
    // Both halves are ASCII digits, checked above.
    let year: i32 = token[..4].parse().unwrap_or_default();
    let month: u32 = token[5..].parse().unwrap_or_default();
    match first_of_month(year, month as i64).and_then(|d| d.pred_opt()) {
        Some(last) => format!("{token}-{:02}", last.day()),
        None => format!("{token}-01"),
    }
}

/// Parses a `YYYY-MM-DD` token into a calendar date.
pub fn parse_day(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, DAY_FORMAT).ok()
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    first_of_month(date.year(), date.month() as i64)
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Shifts a date by whole calendar months with native rollover.
///
/// The target month is computed first; the original day-of-month is then
/// applied as an offset from its first day, so days past the end of the
/// target month spill into the following month.
pub fn add_months_rollover(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let month0 = date.month0() as i64 + months as i64;
    let first = first_of_month(date.year(), month0)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// First day of the month `month0` months after January of `year`.
///
/// `month0` is zero-based and may lie outside `0..12`.
fn first_of_month(year: i32, month0: i64) -> Option<NaiveDate> {
    let total = year as i64 * 12 + month0;
    let y = i32::try_from(total.div_euclid(12)).ok()?;
    let m = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(y, m, 1)
}

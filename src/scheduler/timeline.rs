//! Month-based time axis.
//!
//! The axis has one slot per calendar month touched by a [`TimeRange`].
//! Positions are expressed in months from the start of the first slot, so
//! callers pick their own unit width.
//!
//! The axis is month-granular: the end month is always included, even when
//! the range ends on an earlier day-of-month than it starts (`01-31` to
//! `03-05` yields January, February and March). Stepping from the start
//! day instead would drop the last month in that case.
//!
//! Day-granularity tokens land inside their month proportionally
//! (`(day - 1) / days_in_month`); month tokens land on the slot boundary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{days_in_month, is_month_token, DateToken, TimeRange};

/// Smallest span reported by [`span_months`], in months.
pub const MIN_SPAN_MONTHS: f64 = 0.5;

/// One calendar month on the axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSlot {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// `YYYY-MM`.
    pub label: String,
    /// `YYYY-MM` on the first slot of each year, `MM` otherwise.
    pub short_label: String,
    /// First slot shown for its year.
    pub is_first_month_of_year: bool,
    /// Year parity (for alternating year bands).
    pub is_even_year: bool,
}

/// Months covered by `range`, start and end month included.
pub fn months(range: &TimeRange) -> Vec<MonthSlot> {
    let count = month_index(range, range.end) + 1;
    let mut slots = Vec::with_capacity(count.max(0) as usize);
    let mut prev_year = None;

    for i in 0..count {
        let total = range.start.year() * 12 + range.start.month0() as i32 + i;
        let (year, month) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);
        let label = format!("{year:04}-{month:02}");
        let is_first = prev_year != Some(year);

        slots.push(MonthSlot {
            year,
            month,
            short_label: if is_first {
                label.clone()
            } else {
                format!("{month:02}")
            },
            label,
            is_first_month_of_year: is_first,
            is_even_year: year % 2 == 0,
        });
        prev_year = Some(year);
    }

    slots
}

/// Zero-based month slot of `date` relative to the range start.
///
/// Negative when `date` is before the range.
pub fn month_index(range: &TimeRange, date: NaiveDate) -> i32 {
    (date.year() - range.start.year()) * 12 + (date.month0() as i32 - range.start.month0() as i32)
}

/// Position of a token on the axis, in months.
pub fn month_offset(range: &TimeRange, token: &DateToken) -> Option<f64> {
    let date = token.to_date(false)?;
    let mut offset = month_index(range, date) as f64;
    if !is_month_token(token.as_str()) {
        offset += f64::from(date.day() - 1) / f64::from(days_in_month(date));
    }
    Some(offset)
}

/// Length of a `[start, end]` bar on the axis, in months.
///
/// The end is taken at the close of its last day, and the result never
/// drops below [`MIN_SPAN_MONTHS`] so degenerate phases stay visible.
pub fn span_months(range: &TimeRange, start: &DateToken, end: &DateToken) -> Option<f64> {
    let from = month_offset(range, start)?;
    let last = end.normalize(true);
    let to = month_offset(range, &last)?;
    let last_day = last.to_date(false)?;
    let one_day = 1.0 / f64::from(days_in_month(last_day));
    Some((to - from + one_day).max(MIN_SPAN_MONTHS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range() -> TimeRange {
        TimeRange::new(ymd(2025, 11, 15), ymd(2026, 2, 3))
    }

    #[test]
    fn test_months_include_end_month_for_earlier_end_day() {
        let r = TimeRange::new(ymd(2025, 1, 31), ymd(2025, 3, 5));
        let labels: Vec<_> = months(&r).into_iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn test_months_cross_year() {
        let slots = months(&range());
        let labels: Vec<_> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);

        let short: Vec<_> = slots.iter().map(|s| s.short_label.as_str()).collect();
        assert_eq!(short, vec!["2025-11", "12", "2026-01", "02"]);

        assert!(slots[0].is_first_month_of_year);
        assert!(!slots[1].is_first_month_of_year);
        assert!(slots[2].is_first_month_of_year);
        assert!(slots[2].is_even_year);
        assert!(!slots[0].is_even_year);
    }

    #[test]
    fn test_single_month_range() {
        let r = TimeRange::new(ymd(2025, 3, 1), ymd(2025, 3, 31));
        assert_eq!(months(&r).len(), 1);
    }

    #[test]
    fn test_month_index() {
        let r = range();
        assert_eq!(month_index(&r, ymd(2025, 11, 1)), 0);
        assert_eq!(month_index(&r, ymd(2026, 1, 20)), 2);
        assert_eq!(month_index(&r, ymd(2025, 10, 31)), -1);
    }

    #[test]
    fn test_month_offset() {
        let r = range();
        assert_eq!(month_offset(&r, &"2025-12".into()), Some(1.0));
        // Dec 16: 15 of 31 days into the month.
        let off = month_offset(&r, &"2025-12-16".into()).unwrap();
        assert!((off - (1.0 + 15.0 / 31.0)).abs() < 1e-10);
        assert_eq!(month_offset(&r, &"not a date".into()), None);
    }

    #[test]
    fn test_span_months_whole_months() {
        let r = range();
        let span = span_months(&r, &"2025-12".into(), &"2026-01".into()).unwrap();
        assert!((span - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_span_months_floor() {
        let r = range();
        let span = span_months(&r, &"2025-12-10".into(), &"2025-12-10".into()).unwrap();
        assert_eq!(span, MIN_SPAN_MONTHS);
    }
}

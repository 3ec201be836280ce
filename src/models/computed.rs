//! Derived (presentation-ready) schedule records.
//!
//! These are projections of [`Project`](super::Project) data with every
//! implicit date resolved. They are recomputed whenever the source projects
//! change and are never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Assignment, DateToken};

/// A phase with its start date resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedPhase {
    /// Owning project name.
    pub project_name: String,
    /// Position of the owning project in the document (stable color key).
    pub project_index: usize,
    /// Phase name.
    pub name: String,
    /// Resolved start token. Never implicit.
    pub start_date: DateToken,
    /// End token as written.
    pub end_date: DateToken,
    /// People assigned to this phase.
    pub assignments: Vec<Assignment>,
    /// Sum of assignment percentages.
    pub total_assignment: f64,
    /// Whether the start was inherited from a preceding phase.
    pub is_continuation: bool,
}

/// One person's share of one computed phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAssignment {
    /// Person name.
    pub person: String,
    /// Owning project name.
    pub project_name: String,
    /// Owning project index.
    pub project_index: usize,
    /// Phase name.
    pub phase_name: String,
    /// Resolved phase start.
    pub start_date: DateToken,
    /// Phase end.
    pub end_date: DateToken,
    /// This person's workload fraction.
    pub percentage: f64,
    /// Inherited from the phase.
    pub is_continuation: bool,
}

/// Inclusive date window covering a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl ComputedPhase {
    /// First calendar day of the phase.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.to_date(false)
    }

    /// Last calendar day of the phase.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date.to_date(true)
    }
}

impl PersonAssignment {
    /// First calendar day of the assignment.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.to_date(false)
    }

    /// Last calendar day of the assignment.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date.to_date(true)
    }

    /// Whether the assignment covers any day of `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start <= to && end >= from,
            _ => false,
        }
    }
}

impl TimeRange {
    /// Creates a new range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the range (both ends inclusive).
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(start: &str, end: &str) -> PersonAssignment {
        PersonAssignment {
            person: "Andy".into(),
            project_name: "P".into(),
            project_index: 0,
            phase_name: "BA".into(),
            start_date: start.into(),
            end_date: end.into(),
            percentage: 0.3,
            is_continuation: false,
        }
    }

    #[test]
    fn test_person_assignment_overlap() {
        let a = row("2025-10", "2025-11");
        assert!(a.overlaps(ymd(2025, 11, 1), ymd(2025, 11, 30)));
        assert!(a.overlaps(ymd(2025, 9, 1), ymd(2025, 10, 1)));
        assert!(!a.overlaps(ymd(2025, 12, 1), ymd(2025, 12, 31)));
    }

    #[test]
    fn test_unparseable_assignment_never_overlaps() {
        let a = row("later", "2025-11");
        assert!(!a.overlaps(ymd(2000, 1, 1), ymd(2100, 1, 1)));
    }

    #[test]
    fn test_time_range_contains() {
        let r = TimeRange::new(ymd(2025, 9, 1), ymd(2026, 3, 31));
        assert!(r.contains(ymd(2025, 9, 1)));
        assert!(r.contains(ymd(2026, 3, 31)));
        assert!(!r.contains(ymd(2026, 4, 1)));
    }
}

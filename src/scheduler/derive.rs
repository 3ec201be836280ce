//! Date resolution and workload aggregation.
//!
//! # Algorithm
//! Projects are walked in document order. Within a project the end token of
//! the previous phase is carried forward:
//!
//! 1. An explicit start is used as-is.
//! 2. A chained start becomes the day after the previous phase's end.
//! 3. A chained start with no predecessor falls back to the phase's own end
//!    token, producing a zero-length (or inverted) phase. This mirrors how
//!    existing documents have always rendered and is reported by
//!    [`crate::validation::validate_projects`] instead of being corrected.
//!
//! # Person order
//! [`all_persons`] sorts by byte order of the UTF-8 names (`BTreeSet`).
//! This differs from UTF-16 code-unit order only between astral-plane
//! characters and those in U+E000..=U+FFFF.
//!
//! # Complexity
//! O(p) for p phases; `all_persons` is O(a log a) for a assignments.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::models::{
    add_months_rollover, ComputedPhase, DateToken, PersonAssignment, Project, TimeRange,
};

/// Months of slack added on each side of the schedule window.
pub const RANGE_PADDING_MONTHS: i32 = 1;

/// Resolves every phase's start date.
pub fn computed_phases(projects: &[Project]) -> Vec<ComputedPhase> {
    let mut result = Vec::with_capacity(projects.iter().map(|p| p.phases.len()).sum());

    for (project_index, project) in projects.iter().enumerate() {
        let mut previous_end: Option<&DateToken> = None;

        for phase in &project.phases {
            let start_date = match (&phase.start_date, previous_end) {
                (Some(start), _) => start.clone(),
                (None, Some(prev)) => prev.next_day(),
                (None, None) => phase.end_date.clone(),
            };

            result.push(ComputedPhase {
                project_name: project.name.clone(),
                project_index,
                name: phase.name.clone(),
                start_date,
                end_date: phase.end_date.clone(),
                assignments: phase.assignments.clone(),
                total_assignment: phase.total_assignment(),
                is_continuation: phase.start_date.is_none() && previous_end.is_some(),
            });

            previous_end = Some(&phase.end_date);
        }
    }

    result
}

/// Padded window covering all phases, anchored on today when empty.
pub fn time_range(phases: &[ComputedPhase]) -> TimeRange {
    time_range_at(phases, Local::now().date_naive())
}

/// Padded window covering all phases, anchored on `today` when empty.
///
/// Phases whose dates do not resolve to calendar days are ignored.
pub fn time_range_at(phases: &[ComputedPhase], today: NaiveDate) -> TimeRange {
    let bounds = phases
        .iter()
        .filter_map(|p| Some((p.start()?, p.end()?)))
        .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, (start, end)| {
            Some(match acc {
                None => (start, end),
                Some((min, max)) => (min.min(start), max.max(end)),
            })
        });

    let (min, max) = bounds.unwrap_or((today, today));
    TimeRange::new(
        add_months_rollover(min, -RANGE_PADDING_MONTHS).unwrap_or(min),
        add_months_rollover(max, RANGE_PADDING_MONTHS).unwrap_or(max),
    )
}

/// Every person named in any assignment, deduplicated and sorted.
pub fn all_persons(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| &p.phases)
        .flat_map(|ph| &ph.assignments)
        .map(|a| a.person.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// One row per (phase, assignment), in phase order.
pub fn person_assignments(phases: &[ComputedPhase]) -> Vec<PersonAssignment> {
    phases
        .iter()
        .flat_map(|phase| {
            phase.assignments.iter().map(move |a| PersonAssignment {
                person: a.person.clone(),
                project_name: phase.project_name.clone(),
                project_index: phase.project_index,
                phase_name: phase.name.clone(),
                start_date: phase.start_date.clone(),
                end_date: phase.end_date.clone(),
                percentage: a.percentage,
                is_continuation: phase.is_continuation,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Phase;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_projects() -> Vec<Project> {
        vec![
            Project::new("AI OCR")
                .with_phase(
                    Phase::new("BA", "2025-11")
                        .with_start("2025-10")
                        .with_assignment("Andy", 0.3)
                        .with_assignment("Ben", 0.8),
                )
                .with_phase(Phase::new("SA", "2026-02").with_assignment("Andy", 0.3)),
            Project::new("Portal").with_phase(
                Phase::new("Dev", "2026-09-15")
                    .with_start("2026-03")
                    .with_assignment("Amber", 0.7),
            ),
        ]
    }

    #[test]
    fn test_chaining() {
        let projects = vec![Project::new("P")
            .with_phase(Phase::new("a", "2025-01").with_start("2024-11"))
            .with_phase(Phase::new("b", "2025-03"))];
        let phases = computed_phases(&projects);
        assert_eq!(phases[1].start_date, "2025-02-01");
        assert!(phases[1].is_continuation);
        assert!(!phases[0].is_continuation);
    }

    #[test]
    fn test_chain_carries_through_every_phase() {
        let projects = vec![Project::new("P")
            .with_phase(Phase::new("a", "2025-01").with_start("2025-01"))
            .with_phase(Phase::new("b", "2025-02"))
            .with_phase(Phase::new("c", "2025-02-20"))
            .with_phase(Phase::new("d", "2025-04"))];
        let starts: Vec<_> = computed_phases(&projects)
            .into_iter()
            .map(|p| p.start_date)
            .collect();
        assert_eq!(starts, vec!["2025-01", "2025-02-01", "2025-03-01", "2025-02-21"]);
    }

    #[test]
    fn test_all_persons_byte_order() {
        let projects = vec![Project::new("P").with_phase(
            Phase::new("a", "2025-01")
                .with_assignment("\u{c4}ngel", 0.1)
                .with_assignment("ann", 0.1)
                .with_assignment("Zed", 0.1)
                .with_assignment("ann", 0.2),
        )];
        assert_eq!(all_persons(&projects), vec!["Zed", "ann", "\u{c4}ngel"]);
    }

    #[test]
    fn test_chain_uses_raw_end_token() {
        let projects = vec![Project::new("P")
            .with_phase(Phase::new("a", "2025-01-10").with_start("2025-01-01"))
            .with_phase(Phase::new("b", "2025-02"))
            .with_phase(Phase::new("c", "2025-04"))];
        let phases = computed_phases(&projects);
        assert_eq!(phases[1].start_date, "2025-01-11");
        assert_eq!(phases[2].start_date, "2025-03-01");
    }

    #[test]
    fn test_first_phase_chained_falls_back_to_end() {
        // Degenerate: no predecessor, start collapses onto the end token.
        let projects = vec![Project::new("P").with_phase(Phase::new("a", "2025-06"))];
        let phases = computed_phases(&projects);
        assert_eq!(phases[0].start_date, DateToken::new("2025-06"));
        assert!(!phases[0].is_continuation);
    }

    #[test]
    fn test_chaining_does_not_cross_projects() {
        let projects = vec![
            Project::new("A").with_phase(Phase::new("a", "2025-01").with_start("2024-12")),
            Project::new("B").with_phase(Phase::new("b", "2025-05")),
        ];
        let phases = computed_phases(&projects);
        assert_eq!(phases[1].start_date, "2025-05");
        assert_eq!(phases[1].project_index, 1);
        assert!(!phases[1].is_continuation);
    }

    #[test]
    fn test_total_assignment() {
        let projects = vec![Project::new("P").with_phase(
            Phase::new("a", "2025-01")
                .with_start("2024-12")
                .with_assignment("A", 0.3)
                .with_assignment("B", 0.8)
                .with_assignment("C", 0.5),
        )];
        let phases = computed_phases(&projects);
        assert!((phases[0].total_assignment - 1.6).abs() < 1e-10);
    }

    #[test]
    fn test_time_range_padding() {
        let phases = computed_phases(&sample_projects());
        let range = time_range_at(&phases, ymd(2000, 1, 1));
        assert_eq!(range.start, ymd(2025, 9, 1));
        assert_eq!(range.end, ymd(2026, 10, 15));
    }

    #[test]
    fn test_time_range_month_end_rollover() {
        let projects = vec![Project::new("P")
            .with_phase(Phase::new("a", "2025-01-31").with_start("2025-01-01"))];
        let range = time_range_at(&computed_phases(&projects), ymd(2000, 1, 1));
        assert_eq!(range.start, ymd(2024, 12, 1));
        assert_eq!(range.end, ymd(2025, 3, 3));
    }

    #[test]
    fn test_time_range_empty_centers_on_today() {
        let today = ymd(2026, 10, 19);
        let range = time_range_at(&[], today);
        assert_eq!(range.start, ymd(2026, 9, 19));
        assert_eq!(range.end, ymd(2026, 11, 19));
    }

    #[test]
    fn test_time_range_skips_unparseable() {
        let projects = vec![Project::new("P")
            .with_phase(Phase::new("bad", "someday").with_start("2020-01"))
            .with_phase(Phase::new("ok", "2025-02").with_start("2025-01"))];
        let range = time_range_at(&computed_phases(&projects), ymd(2000, 1, 1));
        assert_eq!(range.start, ymd(2024, 12, 1));
        assert_eq!(range.end, ymd(2025, 3, 28));
    }

    #[test]
    fn test_all_persons_sorted_unique() {
        let persons = all_persons(&sample_projects());
        assert_eq!(persons, vec!["Amber", "Andy", "Ben"]);
    }

    #[test]
    fn test_all_persons_ordinal_order() {
        let projects = vec![Project::new("P").with_phase(
            Phase::new("a", "2025-01")
                .with_assignment("bob", 0.1)
                .with_assignment("Zed", 0.1)
                .with_assignment("Émile", 0.1),
        )];
        assert_eq!(all_persons(&projects), vec!["Zed", "bob", "Émile"]);
    }

    #[test]
    fn test_person_assignments() {
        let phases = computed_phases(&sample_projects());
        let rows = person_assignments(&phases);
        assert_eq!(rows.len(), 4);

        let sa = &rows[2];
        assert_eq!(sa.person, "Andy");
        assert_eq!(sa.phase_name, "SA");
        assert_eq!(sa.start_date, "2025-12-01");
        assert_eq!(sa.end_date, "2026-02");
        assert!(sa.is_continuation);

        assert_eq!(rows[3].project_index, 1);
    }
}

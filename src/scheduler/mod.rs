//! Derived schedule model.
//!
//! Turns parsed projects into the presentation-ready values that layout
//! and exporters read:
//!
//! | Value | Source |
//! |-------|--------|
//! | `computed_phases` | [`computed_phases`] |
//! | `all_persons` | [`all_persons`] |
//! | `person_assignments` | [`person_assignments`] |
//! | `time_range` | [`time_range`] |
//!
//! plus the month axis ([`timeline`]), monthly workload ([`WorkloadReport`])
//! and the project color contract ([`palette_index`]).
//!
//! Everything here is a pure function of its inputs, except that an empty
//! schedule's time range is anchored on the current local date.
//!
//! # Usage
//!
//! ```
//! use u_gantt::scheduler::DerivedSchedule;
//!
//! let derived = DerivedSchedule::from_content(
//!     "AI OCR:\n- BA, 2025-10, 2025-11: Andy 0.3, Ben 0.8\n- SA, --, 2026-02: Andy 0.3",
//! );
//! assert_eq!(derived.computed_phases[1].start_date, "2025-12-01");
//! assert_eq!(derived.all_persons, vec!["Andy", "Ben"]);
//! ```

mod derive;
pub mod timeline;
mod workload;

pub use derive::{
    all_persons, computed_phases, person_assignments, time_range, time_range_at,
    RANGE_PADDING_MONTHS,
};
pub use timeline::MonthSlot;
pub use workload::{
    LoadLevel, PersonLoad, WorkloadReport, HEALTHY_THRESHOLD, OVERLOAD_THRESHOLD,
};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::frontmatter;
use crate::grammar::parse_text;
use crate::models::{ComputedPhase, PersonAssignment, Project, TimeRange};

/// Number of distinct project colors.
pub const PALETTE_SIZE: usize = 8;

/// Project colors (RGB hex), indexed by [`palette_index`].
pub const PROJECT_COLORS: [&str; PALETTE_SIZE] = [
    "60A5FA", "34D399", "FBBF24", "A78BFA", "F472B6", "2DD4BF", "FB923C", "818CF8",
];

/// Stable color slot for the project at `project_index`.
#[inline]
pub fn palette_index(project_index: usize) -> usize {
    project_index % PALETTE_SIZE
}

/// Hex color for the project at `project_index`.
#[inline]
pub fn project_color(project_index: usize) -> &'static str {
    PROJECT_COLORS[palette_index(project_index)]
}

/// Read-only bundle of everything derived from a project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSchedule {
    /// Source projects.
    pub projects: Vec<Project>,
    /// Phases with resolved start dates.
    pub computed_phases: Vec<ComputedPhase>,
    /// Sorted, deduplicated person names.
    pub all_persons: Vec<String>,
    /// One row per (phase, person).
    pub person_assignments: Vec<PersonAssignment>,
    /// Padded window covering all phases.
    pub time_range: TimeRange,
}

impl DerivedSchedule {
    /// Derives from projects, anchoring an empty schedule on today.
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self::from_projects_at(projects, Local::now().date_naive())
    }

    /// Derives from projects, anchoring an empty schedule on `today`.
    pub fn from_projects_at(projects: Vec<Project>, today: NaiveDate) -> Self {
        let computed_phases = computed_phases(&projects);
        let all_persons = all_persons(&projects);
        let person_assignments = person_assignments(&computed_phases);
        let time_range = time_range_at(&computed_phases, today);
        Self {
            projects,
            computed_phases,
            all_persons,
            person_assignments,
            time_range,
        }
    }

    /// Parses a schedule body and derives from it.
    pub fn from_content(content: &str) -> Self {
        Self::from_projects(parse_text(content))
    }

    /// Parses a full document (optional header plus body) and derives from
    /// the body.
    pub fn from_raw_text(text: &str) -> Self {
        Self::from_content(&frontmatter::parse(text).content)
    }

    /// Month slots spanning the time range.
    pub fn months(&self) -> Vec<MonthSlot> {
        timeline::months(&self.time_range)
    }

    /// Per-person monthly workload.
    pub fn workload(&self) -> WorkloadReport {
        WorkloadReport::calculate(self)
    }

    /// Computed phases belonging to the project at `project_index`.
    pub fn phases_of(&self, project_index: usize) -> impl Iterator<Item = &ComputedPhase> {
        self.computed_phases
            .iter()
            .filter(move |p| p.project_index == project_index)
    }

    /// Rows for one person, in phase order.
    pub fn assignments_of<'a>(
        &'a self,
        person: &'a str,
    ) -> impl Iterator<Item = &'a PersonAssignment> + 'a {
        self.person_assignments
            .iter()
            .filter(move |a| a.person == person)
    }
}

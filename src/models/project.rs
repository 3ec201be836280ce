//! Project, phase, and assignment models.
//!
//! A project is an ordered list of phases. Each phase covers a date range
//! and lists the people working on it with their workload fraction.
//!
//! # Chaining
//! A phase without a start date continues from the previous phase of the
//! same project. The reference is kept as `None` here and resolved only by
//! [`crate::scheduler::computed_phases`].

use serde::{Deserialize, Serialize};

use super::DateToken;

/// A person's share of a phase.
///
/// `percentage` is a fraction of full-time capacity (0.5 = half time).
/// Values above 1.0 mean over-allocation and are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Person name.
    pub person: String,
    /// Workload fraction.
    pub percentage: f64,
}

/// A named, time-bounded segment of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Phase name.
    pub name: String,
    /// Start token. `None` = continue from the previous phase.
    pub start_date: Option<DateToken>,
    /// End token (always present).
    pub end_date: DateToken,
    /// People assigned to this phase.
    pub assignments: Vec<Assignment>,
}

/// A project: a name and its phases in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Phases in document order (defines chaining order).
    pub phases: Vec<Phase>,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(person: impl Into<String>, percentage: f64) -> Self {
        Self {
            person: person.into(),
            percentage,
        }
    }
}

impl Phase {
    /// Creates a phase ending at `end_date` that chains from its predecessor.
    pub fn new(name: impl Into<String>, end_date: impl Into<DateToken>) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            end_date: end_date.into(),
            assignments: Vec::new(),
        }
    }

    /// Sets an explicit start date.
    pub fn with_start(mut self, start_date: impl Into<DateToken>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Adds an assignment.
    pub fn with_assignment(mut self, person: impl Into<String>, percentage: f64) -> Self {
        self.assignments.push(Assignment::new(person, percentage));
        self
    }

    /// Whether the start date is implicit.
    #[inline]
    pub fn is_chained(&self) -> bool {
        self.start_date.is_none()
    }

    /// Sum of all assignment percentages.
    pub fn total_assignment(&self) -> f64 {
        self.assignments.iter().map(|a| a.percentage).sum()
    }
}

impl Project {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phases: Vec::new(),
        }
    }

    /// Adds a phase.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Number of phases.
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}

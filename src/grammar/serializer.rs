//! Schedule serializer (inverse of the parser).
//!
//! Emits one line per project header and one line per phase, joined by
//! `\n` with no trailing newline. Blank lines from the source are not
//! reproduced.

use crate::models::{Assignment, Phase, Project};

use super::parser::CHAINED_START;

/// Renders projects in the schedule text notation.
pub fn serialize_to_text(projects: &[Project]) -> String {
    projects
        .iter()
        .map(serialize_project)
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_project(project: &Project) -> String {
    let mut lines = Vec::with_capacity(project.phases.len() + 1);
    lines.push(format!("{}:", project.name));
    lines.extend(project.phases.iter().map(serialize_phase));
    lines.join("\n")
}

fn serialize_phase(phase: &Phase) -> String {
    let start = phase
        .start_date
        .as_ref()
        .map_or(CHAINED_START, |d| d.as_str());
    format!(
        "- {}, {}, {}: {}",
        phase.name,
        start,
        phase.end_date,
        serialize_assignments(&phase.assignments)
    )
}

fn serialize_assignments(assignments: &[Assignment]) -> String {
    assignments
        .iter()
        .map(|a| format!("{} {}", a.person, a.percentage))
        .collect::<Vec<_>>()
        .join(", ")
}

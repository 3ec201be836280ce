//! Line-oriented schedule parser.
//!
//! # Algorithm
//! Single pass over trimmed lines with a "current project" slot:
//! 1. A line ending in `:` that does not start with `-` opens a project
//!    and flushes the previous one.
//! 2. A line starting with `-` is parsed as a phase of the current project.
//! 3. Everything else is skipped. The open project is flushed at the end.
//!
//! Malformed phases and assignments are dropped without error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Assignment, DateToken, Phase, Project};

/// Literal start field meaning "continue from the previous phase".
pub const CHAINED_START: &str = "--";

static PHASE_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^,]+),\s*([^,]+),\s*(.+)$").expect("valid phase head regex"));

static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+([0-9.]+)$").expect("valid assignment regex"));

/// Parses schedule text into projects.
///
/// Never fails: lines that do not fit the grammar are ignored, and phase
/// lines that appear before any project header are discarded.
pub fn parse_text(text: &str) -> Vec<Project> {
    let mut projects = Vec::new();
    let mut current: Option<Project> = None;

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.starts_with('-') {
            if let Some(name) = line.strip_suffix(':') {
                if let Some(done) = current.replace(Project::new(name.trim())) {
                    projects.push(done);
                }
            }
            continue;
        }

        if let Some(project) = current.as_mut() {
            if let Some(phase) = parse_phase(line[1..].trim()) {
                project.phases.push(phase);
            }
        }
    }

    projects.extend(current);
    projects
}

/// Parses `<name>, <start|-->, <end>: <assignments>` (leading dash removed).
fn parse_phase(line: &str) -> Option<Phase> {
    let (head, tail) = line.split_once(':')?;
    let caps = PHASE_HEAD.captures(head.trim())?;

    let start = caps[2].trim();
    let start_date = (start != CHAINED_START).then(|| DateToken::new(start));

    Some(Phase {
        name: caps[1].trim().to_string(),
        start_date,
        end_date: DateToken::new(caps[3].trim()),
        assignments: parse_assignments(tail),
    })
}

/// Parses `Person 0.3, Other 0.8`.
fn parse_assignments(text: &str) -> Vec<Assignment> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split(',')
        .filter_map(|part| {
            let caps = ASSIGNMENT.captures(part.trim())?;
            let percentage = parse_fraction(&caps[2])?;
            Some(Assignment::new(caps[1].trim(), percentage))
        })
        .collect()
}

/// Reads the longest leading decimal number (`1.2.3` → 1.2).
///
/// Returns `None` when no digit precedes the cut (`.`, `..`).
fn parse_fraction(raw: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in raw.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    let number = &raw[..end];
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok().filter(|v: &f64| v.is_finite())
}

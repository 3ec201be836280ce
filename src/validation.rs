//! Advisory checks for parsed schedules.
//!
//! Parsing never rejects input; this pass reports what a careful editor
//! would want to highlight. Detects:
//! - Empty or duplicate project names
//! - Date tokens that do not name a calendar day
//! - Phases that end before they start (after chaining)
//! - Chained phases with nothing to chain from
//!
//! Checks run on the resolved dates, so a chained phase is judged by the
//! start it actually receives.

use crate::models::{DateToken, Project};
use crate::scheduler::computed_phases;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A project header has no name.
    EmptyProjectName,
    /// Two projects share a name.
    DuplicateProjectName,
    /// A date token does not resolve to a calendar day.
    InvalidDate,
    /// A phase ends before it starts.
    EndBeforeStart,
    /// The first phase of a project uses `--`, so its start collapses onto
    /// its own end.
    UnanchoredContinuation,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks a parsed schedule.
///
/// # Returns
/// `Ok(())` if nothing was found, `Err(errors)` with every finding.
pub fn validate_projects(projects: &[Project]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for project in projects {
        if project.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProjectName,
                "Project header has no name",
            ));
        } else if !names.insert(project.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateProjectName,
                format!("Duplicate project name: {}", project.name),
            ));
        }

        if let Some(first) = project.phases.first() {
            if first.is_chained() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnanchoredContinuation,
                    format!(
                        "Phase '{}' in '{}' continues from nothing; it starts at its end date",
                        first.name, project.name
                    ),
                ));
            }
        }

        for phase in &project.phases {
            let tokens = phase.start_date.iter().chain(std::iter::once(&phase.end_date));
            for token in tokens {
                if !resolves(token) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidDate,
                        format!(
                            "Phase '{}' in '{}' has invalid date '{}'",
                            phase.name, project.name, token
                        ),
                    ));
                }
            }
        }
    }

    for phase in computed_phases(projects) {
        if let (Some(start), Some(end)) = (phase.start(), phase.end()) {
            if end < start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EndBeforeStart,
                    format!(
                        "Phase '{}' in '{}' ends ({}) before it starts ({})",
                        phase.name, phase.project_name, phase.end_date, phase.start_date
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn resolves(token: &DateToken) -> bool {
    token.to_date(false).is_some() && token.to_date(true).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_text;

    fn kinds(text: &str) -> Vec<ValidationErrorKind> {
        match validate_projects(&parse_text(text)) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.into_iter().map(|e| e.kind).collect(),
        }
    }

    #[test]
    fn test_valid_schedule() {
        let text = "A:\n- x, 2025-01, 2025-02: P 1\n- y, --, 2025-04: P 1\nB:\n- z, 2025-03-10, 2025-03-20:";
        assert!(validate_projects(&parse_text(text)).is_ok());
    }

    #[test]
    fn test_duplicate_project_name() {
        let k = kinds("A:\n- x, 2025-01, 2025-02:\nA:\n- y, 2025-01, 2025-02:");
        assert_eq!(k, vec![ValidationErrorKind::DuplicateProjectName]);
    }

    #[test]
    fn test_empty_project_name() {
        let k = kinds(":\n- x, 2025-01, 2025-02:");
        assert_eq!(k, vec![ValidationErrorKind::EmptyProjectName]);
    }

    #[test]
    fn test_invalid_date() {
        let k = kinds("A:\n- x, 2025-02-30, someday:");
        assert_eq!(
            k,
            vec![ValidationErrorKind::InvalidDate, ValidationErrorKind::InvalidDate]
        );
    }

    #[test]
    fn test_end_before_start() {
        let k = kinds("A:\n- x, 2025-05, 2025-02:");
        assert_eq!(k, vec![ValidationErrorKind::EndBeforeStart]);
    }

    #[test]
    fn test_chain_past_own_end() {
        // Chained start (Mar 1) lands after the phase's own end.
        let k = kinds("A:\n- x, 2025-01, 2025-02:\n- y, --, 2025-01-15:");
        assert_eq!(k, vec![ValidationErrorKind::EndBeforeStart]);
    }

    #[test]
    fn test_unanchored_continuation() {
        // First phase chains from nothing; start collapses onto "2025-06".
        let k = kinds("A:\n- x, --, 2025-06:");
        assert_eq!(k, vec![ValidationErrorKind::UnanchoredContinuation]);
    }

    #[test]
    fn test_unanchored_continuation_full_date_is_zero_length() {
        let k = kinds("A:\n- x, --, 2025-06-15:");
        assert_eq!(k, vec![ValidationErrorKind::UnanchoredContinuation]);
    }

    #[test]
    fn test_multiple_errors() {
        let k = kinds("A:\n- x, --, nope:\nA:\n");
        assert!(k.contains(&ValidationErrorKind::UnanchoredContinuation));
        assert!(k.contains(&ValidationErrorKind::InvalidDate));
        assert!(k.contains(&ValidationErrorKind::DuplicateProjectName));
        assert_eq!(k.len(), 3);
    }
}

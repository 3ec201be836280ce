//! Plain-text Gantt schedules.
//!
//! A schedule is written as text: project headers followed by phase lines
//! with dates and per-person allocations. This crate parses that text,
//! resolves chained phases into concrete dates, and derives the views a
//! Gantt chart needs (per-phase bars, per-person rows, the visible time
//! range). Documents carry an optional metadata header and are kept in a
//! persisted collection of named workspaces.
//!
//! # Modules
//!
//! - **`grammar`**: Schedule text ⇄ [`models::Project`] list
//! - **`frontmatter`**: `key: value` document header above a `---` line
//! - **`models`**: Parsed and derived types, date tokens
//! - **`scheduler`**: Chaining, time range, person views, month axis, workload
//! - **`validation`**: Advisory checks (invalid dates, inverted phases, duplicates)
//! - **`workspace`**: Named documents, current pointer, import, persistence
//! - **`error`**: Storage failures
//!
//! # Example
//!
//! ```
//! use u_gantt::scheduler::DerivedSchedule;
//!
//! let text = "\
//! name: Roadmap
//! ---
//! Portal:
//! - Design, 2025-01, 2025-02: Ann 0.5
//! - Build, --, 2025-04: Ann 1, Bob 0.5";
//!
//! let schedule = DerivedSchedule::from_raw_text(text);
//! assert_eq!(schedule.computed_phases[1].start_date, "2025-03-01");
//! assert_eq!(schedule.all_persons, vec!["Ann", "Bob"]);
//! ```

pub mod error;
pub mod frontmatter;
pub mod grammar;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workspace;

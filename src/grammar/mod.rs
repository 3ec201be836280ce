//! Plain-text schedule notation.
//!
//! ```text
//! AI OCR:
//! - BA, 2025-10, 2025-11: Andy 0.3, Ben 0.8
//! - SA, --, 2026-02: Andy 0.3
//! ```
//!
//! A line ending in `:` names a project. Each following `-` line is a phase:
//! name, start token (or `--` to chain from the previous phase), end token,
//! then after the colon a comma-separated list of `person fraction` pairs.
//!
//! # Round trip
//! For any `projects` returned by [`parse_text`],
//! `parse_text(&serialize_to_text(&projects)) == projects`. Hand-written input
//! is normalized (whitespace, numeric form, blank lines), so parse followed
//! by serialize is not byte-identical to arbitrary source text.
//!
//! ```
//! use u_gantt::grammar::{parse_text, serialize_to_text};
//!
//! let projects = parse_text("Web:\n- Build,  2025-01 , 2025-03 :Ann 0.50");
//! assert_eq!(serialize_to_text(&projects), "Web:\n- Build, 2025-01, 2025-03: Ann 0.5");
//! ```

mod parser;
mod serializer;

pub use parser::{parse_text, CHAINED_START};
pub use serializer::serialize_to_text;

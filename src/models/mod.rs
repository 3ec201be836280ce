//! Schedule domain models.
//!
//! Two layers: what the text says, and what it means once dates are
//! resolved.
//!
//! | Layer | Types | Produced by |
//! |-------|-------|-------------|
//! | Parsed | [`Project`], [`Phase`], [`Assignment`] | [`grammar::parse_text`](crate::grammar::parse_text) |
//! | Derived | [`ComputedPhase`], [`PersonAssignment`], [`TimeRange`] | [`scheduler`](crate::scheduler) |
//!
//! Dates stay as [`DateToken`]s (`YYYY-MM` or `YYYY-MM-DD`) on both layers;
//! derived types additionally expose them as calendar days.

mod computed;
mod date;
mod project;

pub use computed::{ComputedPhase, PersonAssignment, TimeRange};
pub use date::{
    add_months_rollover, days_in_month, is_month_token, normalize, parse_day, DateToken,
};
pub use project::{Assignment, Phase, Project};

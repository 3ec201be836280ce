//! Per-person monthly workload.
//!
//! For every person and every month on the time axis, sums the workload
//! fractions of that person's assignments touching the month.
//!
//! # Load levels
//!
//! | Level | Monthly load |
//! |-------|--------------|
//! | Overloaded | > 1.1 |
//! | Healthy | 0.5 ..= 1.1 |
//! | Light | > 0, < 0.5 |
//! | Idle | 0 |
//!
//! An assignment counts toward a month when any of its days falls inside
//! it, so a phase ending on the 1st still loads that whole month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::timeline::{months, MonthSlot};
use super::DerivedSchedule;
use crate::models::days_in_month;

/// Monthly load above which a person is overloaded.
pub const OVERLOAD_THRESHOLD: f64 = 1.1;
/// Monthly load from which a person counts as well utilized.
pub const HEALTHY_THRESHOLD: f64 = 0.5;

/// Classification of a monthly load value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadLevel {
    /// Nothing assigned.
    Idle,
    /// Below the healthy threshold.
    Light,
    /// Between the healthy and overload thresholds.
    Healthy,
    /// Above the overload threshold.
    Overloaded,
}

impl LoadLevel {
    /// Classifies a monthly load.
    pub fn classify(load: f64) -> Self {
        if load > OVERLOAD_THRESHOLD {
            Self::Overloaded
        } else if load >= HEALTHY_THRESHOLD {
            Self::Healthy
        } else if load > 0.0 {
            Self::Light
        } else {
            Self::Idle
        }
    }
}

/// One person's load per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonLoad {
    /// Person name.
    pub person: String,
    /// Load per month slot, aligned with [`WorkloadReport::months`].
    pub monthly: Vec<f64>,
}

/// Monthly workload for all people in a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadReport {
    /// The month axis.
    pub months: Vec<MonthSlot>,
    /// One entry per person, in name order.
    pub persons: Vec<PersonLoad>,
}

impl PersonLoad {
    /// Highest monthly load.
    pub fn peak(&self) -> f64 {
        self.monthly.iter().copied().fold(0.0, f64::max)
    }

    /// Level for the month at `index`.
    pub fn level(&self, index: usize) -> LoadLevel {
        LoadLevel::classify(self.monthly.get(index).copied().unwrap_or(0.0))
    }
}

impl WorkloadReport {
    /// Computes monthly loads over the schedule's time range.
    pub fn calculate(schedule: &DerivedSchedule) -> Self {
        let months = months(&schedule.time_range);
        let bounds: Vec<(NaiveDate, NaiveDate)> =
            months.iter().filter_map(month_bounds).collect();

        let persons = schedule
            .all_persons
            .iter()
            .map(|person| {
                let rows: Vec<_> = schedule
                    .person_assignments
                    .iter()
                    .filter(|a| &a.person == person)
                    .collect();

                let monthly: Vec<f64> = bounds
                    .iter()
                    .map(|&(from, to)| {
                        rows.iter()
                            .filter(|a| a.overlaps(from, to))
                            .map(|a| a.percentage)
                            .sum::<f64>()
                    })
                    .collect();

                PersonLoad {
                    person: person.clone(),
                    monthly,
                }
            })
            .collect();

        Self { months, persons }
    }

    /// Load for a person, if present.
    pub fn person(&self, name: &str) -> Option<&PersonLoad> {
        self.persons.iter().find(|p| p.person == name)
    }

    /// Every (person, month, load) cell above the overload threshold.
    pub fn overloaded(&self) -> Vec<(&str, &MonthSlot, f64)> {
        self.persons
            .iter()
            .flat_map(|p| {
                p.monthly
                    .iter()
                    .zip(&self.months)
                    .filter(|(load, _)| LoadLevel::classify(**load) == LoadLevel::Overloaded)
                    .map(move |(load, slot)| (p.person.as_str(), slot, *load))
            })
            .collect()
    }
}

fn month_bounds(slot: &MonthSlot) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(slot.year, slot.month, 1)?;
    let last = NaiveDate::from_ymd_opt(slot.year, slot.month, days_in_month(first))?;
    Some((first, last))
}

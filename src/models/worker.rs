//! Worker model.
//!
//! Workers are the assignable resources (doctors in a hospital roster).
//! A worker carries a qualification, an activity fraction, and the
//! history counters an eligibility rule may consult.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shift marker that makes a worker eligible under the default rule.
pub const NIGHT_SHIFT: &str = "night";

/// A worker that can be assigned to slots.
///
/// Workers are read-only during an allocation run; per-run bookkeeping
/// (how many slots a worker holds) lives in the allocator. Deserialization
/// goes through [`Worker::new`], so an out-of-range activity is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkerFields")]
pub struct Worker {
    /// Display name. Not required to be unique.
    pub name: String,
    /// Qualification label (diploma).
    pub qualification: String,
    /// Activity fraction (0.0 to 1.0, where 1.0 = full time).
    pub activity: f64,
    /// Accumulated rest/leave days.
    pub rest_days: u32,
    /// Type of the most recent shift worked (e.g. "night").
    pub last_shift: String,
    /// Holiday count.
    pub holidays: u32,
    /// Weekend days worked.
    pub weekend_days: u32,
}

/// Unchecked serialized form of a [`Worker`].
#[derive(Deserialize)]
struct WorkerFields {
    name: String,
    qualification: String,
    activity: f64,
    #[serde(default)]
    rest_days: u32,
    #[serde(default)]
    last_shift: String,
    #[serde(default)]
    holidays: u32,
    #[serde(default)]
    weekend_days: u32,
}

impl TryFrom<WorkerFields> for Worker {
    type Error = ValidationError;

    fn try_from(fields: WorkerFields) -> Result<Self, Self::Error> {
        Ok(Worker::new(fields.name, fields.qualification, fields.activity)?
            .with_rest_days(fields.rest_days)
            .with_last_shift(fields.last_shift)
            .with_holidays(fields.holidays)
            .with_weekend_days(fields.weekend_days))
    }
}

impl Worker {
    /// Creates a worker, rejecting an activity fraction outside `[0, 1]`.
    pub fn new(
        name: impl Into<String>,
        qualification: impl Into<String>,
        activity: f64,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&activity) {
            return Err(ValidationError::ActivityOutOfRange { value: activity });
        }
        Ok(Self {
            name: name.into(),
            qualification: qualification.into(),
            activity,
            rest_days: 0,
            last_shift: String::new(),
            holidays: 0,
            weekend_days: 0,
        })
    }

    /// Sets the rest/leave day counter.
    pub fn with_rest_days(mut self, rest_days: u32) -> Self {
        self.rest_days = rest_days;
        self
    }

    /// Sets the most recent shift marker.
    pub fn with_last_shift(mut self, last_shift: impl Into<String>) -> Self {
        self.last_shift = last_shift.into();
        self
    }

    /// Sets the holiday counter.
    pub fn with_holidays(mut self, holidays: u32) -> Self {
        self.holidays = holidays;
        self
    }

    /// Sets the weekend day counter.
    pub fn with_weekend_days(mut self, weekend_days: u32) -> Self {
        self.weekend_days = weekend_days;
        self
    }

    /// Whether the worker can be assigned right now under the default rule:
    /// the last shift was a night shift.
    pub fn is_eligible(&self) -> bool {
        self.last_shift == NIGHT_SHIFT
    }

    /// Whether the worker holds the given qualification.
    pub fn is_qualified(&self, qualification: &str) -> bool {
        self.qualification == qualification
    }
}

impl std::fmt::Display for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) activity {}%, rest {}, last shift '{}', holidays {}, weekend days {}",
            self.name,
            self.qualification,
            self.activity * 100.0,
            self.rest_days,
            self.last_shift,
            self.holidays,
            self.weekend_days
        )
    }
}

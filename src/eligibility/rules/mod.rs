//! Built-in eligibility rules.
//!
//! # Categories
//!
//! - **Shift history**: LAST_SHIFT, MIN_REST
//! - **Profile**: QUALIFICATION, MIN_ACTIVITY
//! - **Counters**: MAX_WEEKEND, MAX_HOLIDAYS
//! - **Run state**: MAX_COMMITMENTS, NO_CONFLICT
//! - **Trivial**: ALWAYS

use super::{EligibilityContext, EligibilityRule};
use crate::models::{Worker, NIGHT_SHIFT};

// ======================== Shift history ========================

/// Admits workers whose most recent shift matches a marker exactly.
///
/// `LastShiftIs::night()` is the default rule of the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastShiftIs(pub String);

impl LastShiftIs {
    /// Creates the rule for the given shift marker.
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    /// Admits workers coming off a night shift.
    pub fn night() -> Self {
        Self::new(NIGHT_SHIFT)
    }
}

impl EligibilityRule for LastShiftIs {
    fn name(&self) -> &'static str {
        "LAST_SHIFT"
    }

    fn is_eligible(&self, worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        worker.last_shift == self.0
    }

    fn description(&self) -> &'static str {
        "Last shift matches marker"
    }
}

/// Admits workers with at least the given number of rest days.
#[derive(Debug, Clone, Copy)]
pub struct MinRestDays(pub u32);

impl EligibilityRule for MinRestDays {
    fn name(&self) -> &'static str {
        "MIN_REST"
    }

    fn is_eligible(&self, worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        worker.rest_days >= self.0
    }

    fn description(&self) -> &'static str {
        "Minimum rest days"
    }
}

// ======================== Profile ========================

/// Admits workers holding a qualification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasQualification(pub String);

impl HasQualification {
    /// Creates the rule for the given qualification label.
    pub fn new(qualification: impl Into<String>) -> Self {
        Self(qualification.into())
    }
}

impl EligibilityRule for HasQualification {
    fn name(&self) -> &'static str {
        "QUALIFICATION"
    }

    fn is_eligible(&self, worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        worker.is_qualified(&self.0)
    }

    fn description(&self) -> &'static str {
        "Holds qualification"
    }
}

/// Admits workers whose activity fraction is at least the threshold.
#[derive(Debug, Clone, Copy)]
pub struct MinActivity(pub f64);

impl EligibilityRule for MinActivity {
    fn name(&self) -> &'static str {
        "MIN_ACTIVITY"
    }

    fn is_eligible(&self, worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        worker.activity >= self.0
    }

    fn description(&self) -> &'static str {
        "Minimum activity fraction"
    }
}

// ======================== Counters ========================

/// Admits workers with at most the given number of weekend days worked.
#[derive(Debug, Clone, Copy)]
pub struct MaxWeekendDays(pub u32);

impl EligibilityRule for MaxWeekendDays {
    fn name(&self) -> &'static str {
        "MAX_WEEKEND"
    }

    fn is_eligible(&self, worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        worker.weekend_days <= self.0
    }

    fn description(&self) -> &'static str {
        "Maximum weekend days worked"
    }
}

/// Admits workers with at most the given number of holidays.
#[derive(Debug, Clone, Copy)]
pub struct MaxHolidays(pub u32);

impl EligibilityRule for MaxHolidays {
    fn name(&self) -> &'static str {
        "MAX_HOLIDAYS"
    }

    fn is_eligible(&self, worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        worker.holidays <= self.0
    }

    fn description(&self) -> &'static str {
        "Maximum holiday count"
    }
}

// ======================== Run state ========================

/// Admits workers holding fewer than the given number of slots this run.
#[derive(Debug, Clone, Copy)]
pub struct MaxCommitments(pub usize);

impl EligibilityRule for MaxCommitments {
    fn name(&self) -> &'static str {
        "MAX_COMMITMENTS"
    }

    fn is_eligible(&self, _worker: &Worker, context: &EligibilityContext<'_>) -> bool {
        context.commitments() < self.0
    }

    fn description(&self) -> &'static str {
        "Maximum slots per run"
    }
}

/// Admits workers with no held slot overlapping the slot being filled.
#[derive(Debug, Clone, Copy)]
pub struct NoConflict;

impl EligibilityRule for NoConflict {
    fn name(&self) -> &'static str {
        "NO_CONFLICT"
    }

    fn is_eligible(&self, _worker: &Worker, context: &EligibilityContext<'_>) -> bool {
        !context.has_conflict()
    }

    fn description(&self) -> &'static str {
        "No overlapping slot held"
    }
}

// ======================== Trivial ========================

/// Admits every worker.
#[derive(Debug, Clone, Copy)]
pub struct Always;

impl EligibilityRule for Always {
    fn name(&self) -> &'static str {
        "ALWAYS"
    }

    fn is_eligible(&self, _worker: &Worker, _context: &EligibilityContext<'_>) -> bool {
        true
    }
}

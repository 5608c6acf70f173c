//! Slot (demand unit) model.
//!
//! A slot is a time window on a date that needs a number of workers.
//! It records the workers assigned to it in assignment order.
//!
//! # State
//! A slot is `Open` while `assigned < required` and `Full` once
//! `assigned == required`. Only [`Slot::try_assign`] and
//! [`Slot::try_assign_by`] move it from `Open` to `Full`; whether an
//! `Open` slot ends a run unmet is decided by the allocator.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{SlotDate, TimeWindow, Worker};
use crate::eligibility::{EligibilityContext, EligibilityRule};
use crate::error::ValidationError;

/// Identity of a slot: its date and time window.
///
/// Ordered by date, then window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId {
    /// Date of the slot.
    pub date: SlotDate,
    /// Time window of the slot.
    pub window: TimeWindow,
}

impl SlotId {
    /// Creates a slot identity.
    pub fn new(date: SlotDate, window: TimeWindow) -> Self {
        Self { date, window }
    }

    /// Whether two slots share a date and overlapping windows.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.date == other.date && self.window.overlaps(&other.window)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.window)
    }
}

/// A worker as recorded on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignee {
    /// Worker name.
    pub name: String,
    /// Worker qualification.
    pub qualification: String,
}

impl Assignee {
    /// Creates an assignee record.
    pub fn new(name: impl Into<String>, qualification: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualification: qualification.into(),
        }
    }
}

impl From<&Worker> for Assignee {
    fn from(worker: &Worker) -> Self {
        Self::new(worker.name.as_str(), worker.qualification.as_str())
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.qualification)
    }
}

/// Why an assignment attempt was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The slot already has its required headcount.
    SlotFull,
    /// The worker is not eligible right now.
    Ineligible,
}

/// Result of offering a worker to a slot.
///
/// Rejection is an ordinary outcome during a scan, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOutcome {
    /// The worker was appended to the slot.
    Assigned,
    /// The worker was not appended.
    Rejected(Rejection),
}

impl AssignmentOutcome {
    /// Whether the worker was assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentOutcome::Assigned)
    }
}

/// A demand unit to be staffed.
///
/// Deserialization goes through [`Slot::with_initial_assigned`], so a slot
/// never arrives holding more workers than it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlotFields")]
pub struct Slot {
    /// Date and time window.
    pub id: SlotId,
    /// Required headcount.
    pub required: usize,
    /// Assigned workers, in assignment order.
    pub assigned: Vec<Assignee>,
}

#[derive(Deserialize)]
struct SlotFields {
    id: SlotId,
    required: usize,
    #[serde(default)]
    assigned: Vec<Assignee>,
}

impl TryFrom<SlotFields> for Slot {
    type Error = ValidationError;

    fn try_from(fields: SlotFields) -> Result<Self, Self::Error> {
        Slot::from_parts(fields.id.date, fields.id.window, fields.required)
            .with_initial_assigned(fields.assigned)
    }
}

impl Slot {
    /// Creates an empty slot from `HH:MM` times and a `DD-MM-YYYY` date.
    ///
    /// The date is checked syntactically only (see [`SlotDate::parse`]).
    pub fn new(
        begin: &str,
        end: &str,
        required: usize,
        date: &str,
    ) -> Result<Self, ValidationError> {
        let date = SlotDate::parse(date)?;
        let window = TimeWindow::parse(begin, end)?;
        Ok(Self::from_parts(date, window, required))
    }

    /// Creates an empty slot from typed parts.
    pub fn from_parts(date: SlotDate, window: TimeWindow, required: usize) -> Self {
        Self {
            id: SlotId::new(date, window),
            required,
            assigned: Vec::new(),
        }
    }

    /// Seeds the slot with already-assigned workers.
    ///
    /// Fails if the list is longer than the required headcount.
    pub fn with_initial_assigned(
        mut self,
        assigned: Vec<Assignee>,
    ) -> Result<Self, ValidationError> {
        if assigned.len() > self.required {
            return Err(ValidationError::OverAssigned {
                required: self.required,
                assigned: assigned.len(),
            });
        }
        self.assigned = assigned;
        Ok(self)
    }

    /// Date of the slot.
    #[inline]
    pub fn date(&self) -> SlotDate {
        self.id.date
    }

    /// Time window of the slot.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        self.id.window
    }

    /// Whether the slot has reached its required headcount.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.assigned.len() >= self.required
    }

    /// Headcount still missing.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.assigned.len())
    }

    /// Offers a worker under the default eligibility rule
    /// ([`Worker::is_eligible`]).
    pub fn try_assign(&mut self, worker: &Worker) -> AssignmentOutcome {
        self.offer(worker, || worker.is_eligible())
    }

    /// Offers a worker under an injected eligibility rule.
    pub fn try_assign_by(
        &mut self,
        worker: &Worker,
        rule: &dyn EligibilityRule,
        context: &EligibilityContext<'_>,
    ) -> AssignmentOutcome {
        self.offer(worker, || rule.is_eligible(worker, context))
    }

    /// Appends `worker` if the slot is open and `eligible` holds.
    ///
    /// Fullness is checked first; `eligible` is not evaluated for a full slot.
    pub(crate) fn offer<F>(&mut self, worker: &Worker, eligible: F) -> AssignmentOutcome
    where
        F: FnOnce() -> bool,
    {
        if self.is_full() {
            return AssignmentOutcome::Rejected(Rejection::SlotFull);
        }
        if !eligible() {
            return AssignmentOutcome::Rejected(Rejection::Ineligible);
        }
        self.assigned.push(Assignee::from(worker));
        AssignmentOutcome::Assigned
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_slot_block(f, &self.id, self.required, &self.assigned)
    }
}

/// Writes the slot block shared by [`Slot`] and the report's slot outcomes.
pub(crate) fn write_slot_block(
    f: &mut fmt::Formatter<'_>,
    id: &SlotId,
    required: usize,
    assigned: &[Assignee],
) -> fmt::Result {
    write!(
        f,
        "Slot({}, {})\nWorkers needed: {}\nAssigned: {}",
        id.date,
        id.window,
        required,
        assigned.len()
    )?;
    for assignee in assigned {
        write!(f, "\n - {assignee}")?;
    }
    Ok(())
}

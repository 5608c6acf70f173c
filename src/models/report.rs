//! Allocation report (solution) model.
//!
//! The report is the only output of an allocation run: every slot's final
//! assigned list, the pool positions of the workers the run assigned to
//! it, and an itemized list of slots that ended below their headcount.
//! Unmet demand is data here, not an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::slot::write_slot_block;
use super::{Assignee, Slot, SlotId};

/// The outcome of one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// One entry per input slot, in input order.
    pub slots: Vec<SlotOutcome>,
    /// Slots that finished the run not full, in input order.
    pub unmet: Vec<UnmetSlot>,
}

/// Final state of one slot after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOutcome {
    /// Slot identity.
    pub slot_id: SlotId,
    /// Required headcount.
    pub required: usize,
    /// Assigned workers, including any pre-assigned ones.
    pub assigned: Vec<Assignee>,
    /// Pool positions of the workers assigned during the run.
    pub contributors: Vec<usize>,
}

/// A slot whose assigned count stayed below its required count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetSlot {
    /// Position of the slot in the input list.
    pub index: usize,
    /// Slot identity.
    pub slot_id: SlotId,
    /// Required headcount.
    pub required: usize,
    /// Headcount reached.
    pub assigned: usize,
    /// `required - assigned`.
    pub shortfall: usize,
}

impl SlotOutcome {
    /// Captures a slot's final state.
    pub fn from_slot(slot: &Slot, contributors: Vec<usize>) -> Self {
        Self {
            slot_id: slot.id,
            required: slot.required,
            assigned: slot.assigned.clone(),
            contributors,
        }
    }

    /// Whether the slot reached its required headcount.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.assigned.len() >= self.required
    }
}

impl UnmetSlot {
    /// Records an unmet slot at input position `index`.
    pub fn from_slot(index: usize, slot: &Slot) -> Self {
        Self {
            index,
            slot_id: slot.id,
            required: slot.required,
            assigned: slot.assigned.len(),
            shortfall: slot.remaining(),
        }
    }
}

impl AllocationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot outcome.
    pub fn add_outcome(&mut self, outcome: SlotOutcome) {
        self.slots.push(outcome);
    }

    /// Adds an unmet slot.
    pub fn add_unmet(&mut self, unmet: UnmetSlot) {
        self.unmet.push(unmet);
    }

    /// Whether every slot reached its required headcount.
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Assigned list of the first slot with the given identity.
    pub fn assigned_for(&self, slot_id: &SlotId) -> Option<&[Assignee]> {
        self.slots
            .iter()
            .find(|s| s.slot_id == *slot_id)
            .map(|s| s.assigned.as_slice())
    }

    /// Identities of the unmet slots, in input order.
    pub fn unmet_ids(&self) -> Vec<SlotId> {
        self.unmet.iter().map(|u| u.slot_id).collect()
    }

    /// Whether the slot at input position `index` is unmet.
    pub fn is_unmet(&self, index: usize) -> bool {
        self.unmet.iter().any(|u| u.index == index)
    }

    /// Total missing headcount across all unmet slots.
    pub fn total_shortfall(&self) -> usize {
        self.unmet.iter().map(|u| u.shortfall).sum()
    }

    /// Identities of the slots a worker (by name) is assigned to.
    pub fn slots_for_worker(&self, name: &str) -> Vec<SlotId> {
        self.slots
            .iter()
            .filter(|s| s.assigned.iter().any(|a| a.name == name))
            .map(|s| s.slot_id)
            .collect()
    }

    /// Number of assignments made during the run (pre-assigned excluded).
    pub fn assignment_count(&self) -> usize {
        self.slots.iter().map(|s| s.contributors.len()).sum()
    }
}

impl fmt::Display for UnmetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No worker available for slot {}: short by {} ({} of {} assigned)",
            self.slot_id, self.shortfall, self.assigned, self.required
        )
    }
}

impl fmt::Display for SlotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_slot_block(f, &self.slot_id, self.required, &self.assigned)
    }
}

/// Renders every slot block, then one notice line per unmet slot.
impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Allocated slots: {}", self.slots.len())?;
        for outcome in &self.slots {
            writeln!(f, "{}", "-".repeat(40))?;
            writeln!(f, "{outcome}")?;
        }
        if !self.unmet.is_empty() {
            writeln!(f, "{}", "-".repeat(40))?;
            for unmet in &self.unmet {
                writeln!(f, "{unmet}")?;
            }
        }
        Ok(())
    }
}

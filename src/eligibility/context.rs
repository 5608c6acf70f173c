//! Per-run context passed to eligibility rules.

use crate::models::SlotId;

/// Run state visible to eligibility rules.
///
/// Describes the slot being filled and what the candidate worker already
/// holds in the current run. Workers themselves are never mutated during
/// a run; this is where per-run commitments surface.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityContext<'a> {
    /// Slot being filled.
    pub slot: &'a SlotId,
    /// Position of the candidate in the worker pool.
    pub pool_index: usize,
    /// Slots the candidate already holds in this run, in assignment order.
    pub booked: &'a [SlotId],
}

impl<'a> EligibilityContext<'a> {
    /// Creates a context for a slot with no run history.
    pub fn for_slot(slot: &'a SlotId) -> Self {
        Self {
            slot,
            pool_index: 0,
            booked: &[],
        }
    }

    /// Sets the candidate's pool position.
    pub fn with_pool_index(mut self, pool_index: usize) -> Self {
        self.pool_index = pool_index;
        self
    }

    /// Sets the slots the candidate already holds.
    pub fn with_booked(mut self, booked: &'a [SlotId]) -> Self {
        self.booked = booked;
        self
    }

    /// Number of slots the candidate already holds in this run.
    #[inline]
    pub fn commitments(&self) -> usize {
        self.booked.len()
    }

    /// Whether any held slot overlaps the slot being filled.
    pub fn has_conflict(&self) -> bool {
        self.booked.iter().any(|b| b.conflicts_with(self.slot))
    }
}

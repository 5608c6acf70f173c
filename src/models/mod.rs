//! Staffing domain models.
//!
//! Provides the core data types for a staffing run: the workers to
//! assign, the slots that need them, and the report a run produces.
//!
//! # Domain Mappings
//!
//! | u-roster | Hospital | Retail | Support desk |
//! |----------|----------|--------|--------------|
//! | Worker | Doctor | Clerk | Agent |
//! | Slot | Shift | Opening hours block | On-call window |
//! | AllocationReport | Duty roster | Staff plan | Rota |

mod calendar;
mod report;
mod slot;
mod worker;

pub use calendar::{parse_time, SlotDate, TimeWindow};
pub use report::{AllocationReport, SlotOutcome, UnmetSlot};
pub use slot::{Assignee, AssignmentOutcome, Rejection, Slot, SlotId};
pub use worker::{Worker, NIGHT_SHIFT};

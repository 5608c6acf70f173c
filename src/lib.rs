//! Greedy staff-to-slot allocation with unmet-demand reporting.
//!
//! Given a pool of workers and a list of time slots, each needing a number
//! of workers, the allocator fills slots first-come-first-served and
//! reports every slot it could not fully staff.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Worker`, `Slot`, `SlotId`, `SlotDate`,
//!   `TimeWindow`, `AllocationReport`, `UnmetSlot`
//! - **`eligibility`**: Pluggable eligibility rules and rule combinators
//! - **`allocator`**: The greedy pass, its configuration, and coverage KPIs
//! - **`ingest`**: Conversion of roster and demand records into models
//! - **`validation`**: Activity parsing and batch-level duplicate checks
//! - **`error`**: `ValidationError`
//!
//! # Example
//!
//! ```
//! use u_roster::allocator::{Allocator, AllocationKpi};
//! use u_roster::models::{Slot, Worker};
//!
//! let workers = vec![Worker::new("Alice", "GP", 1.0).unwrap().with_last_shift("night")];
//! let mut slots = vec![
//!     Slot::new("08:00", "12:00", 1, "07-03-2025").unwrap(),
//!     Slot::new("14:00", "18:00", 2, "07-03-2025").unwrap(),
//! ];
//!
//! let report = Allocator::new().run(&workers, &mut slots);
//! assert_eq!(report.unmet.len(), 1);
//! assert_eq!(AllocationKpi::calculate(&report).total_shortfall, 1);
//! ```
//!
//! # Logging
//!
//! Runs emit `tracing` events (assignments at `debug`, unmet slots and
//! rejected records at `warn`, a run summary at `info`). No subscriber is
//! installed by the library.

pub mod allocator;
pub mod eligibility;
pub mod error;
pub mod ingest;
pub mod models;
pub mod validation;

pub use error::ValidationError;

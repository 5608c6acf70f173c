//! Greedy allocator and coverage evaluation.
//!
//! # Algorithm
//!
//! `Allocator` fills slots first-come-first-served over the input order,
//! scanning the worker pool for each slot and assigning eligible workers
//! until the slot is full or the pool is exhausted. It is not optimal or
//! fair; it is deterministic and explainable.
//!
//! # Configuration
//!
//! `AllocatorConfig` selects the pool scan order and the per-worker
//! booking limit. The default reproduces the legacy pass.
//!
//! # KPI
//!
//! `AllocationKpi` computes fill rate, shortfall, and per-worker load.

mod config;
mod greedy;
mod kpi;

pub use config::{AllocatorConfig, BookingPolicy, ScanOrder};
pub use greedy::Allocator;
pub use kpi::AllocationKpi;

//! Record-level ingestion.
//!
//! Roster and demand rows arrive already deserialized (from CSV, JSON, or
//! any serde format) with the field names of the source roster. This
//! module turns them into [`Worker`]s and [`Slot`]s, setting aside every
//! record that fails construction so the allocator only ever sees valid
//! values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocator::{Allocator, AllocatorConfig};
use crate::error::ValidationError;
use crate::models::{AllocationReport, Assignee, Slot, Worker};
use crate::validation::parse_activity;

/// Activity as found in a roster row: a number or a text such as `"80%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityInput {
    /// Fraction in `[0, 1]`.
    Fraction(f64),
    /// `"0.8"` or `"80%"`.
    Text(String),
}

impl ActivityInput {
    /// The activity as a fraction. Numbers are range-checked later by
    /// [`Worker::new`].
    pub fn to_fraction(&self) -> Result<f64, ValidationError> {
        match self {
            ActivityInput::Fraction(value) => Ok(*value),
            ActivityInput::Text(text) => parse_activity(text),
        }
    }
}

/// One roster row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Worker name.
    pub name: String,
    /// Qualification label.
    pub diploma: String,
    /// Activity as a fraction or percentage.
    pub activity_percent: ActivityInput,
    /// Accumulated rest/leave days.
    #[serde(default)]
    pub days_off: u32,
    /// Type of the most recent shift (e.g. "night").
    #[serde(default)]
    pub last_shift: String,
    /// Holiday count.
    #[serde(default)]
    pub number_of_holidays: u32,
    /// Weekend days worked.
    #[serde(default)]
    pub weekend_days: u32,
}

impl TryFrom<WorkerRecord> for Worker {
    type Error = ValidationError;

    fn try_from(record: WorkerRecord) -> Result<Self, Self::Error> {
        let activity = record.activity_percent.to_fraction()?;
        Ok(Worker::new(record.name, record.diploma, activity)?
            .with_rest_days(record.days_off)
            .with_last_shift(record.last_shift)
            .with_holidays(record.number_of_holidays)
            .with_weekend_days(record.weekend_days))
    }
}

/// One demand row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDemand {
    /// Start time, `HH:MM`.
    pub begin_hour: String,
    /// End time, `HH:MM`.
    pub end_hour: String,
    /// Required headcount.
    pub nb_doctors_needed: usize,
    /// Workers already on the slot; at most `nb_doctors_needed`.
    #[serde(default)]
    pub initial_assigned: Vec<Assignee>,
    /// Date, `DD-MM-YYYY`.
    pub date: String,
}

impl TryFrom<SlotDemand> for Slot {
    type Error = ValidationError;

    fn try_from(demand: SlotDemand) -> Result<Self, Self::Error> {
        Slot::new(
            &demand.begin_hour,
            &demand.end_hour,
            demand.nb_doctors_needed,
            &demand.date,
        )?
        .with_initial_assigned(demand.initial_assigned)
    }
}

/// A record that failed construction.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record {index}: {source}")]
pub struct RecordError {
    /// Position of the record in its input batch.
    pub index: usize,
    /// Why it was rejected.
    pub source: ValidationError,
}

/// A batch split into constructed values and rejected records.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<T> {
    /// Valid values, in input order.
    pub accepted: Vec<T>,
    /// Rejected records, in input order.
    pub rejected: Vec<RecordError>,
}

impl<T> Ingested<T> {
    /// Whether every record was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Converts roster rows into workers.
pub fn ingest_workers<I>(records: I) -> Ingested<Worker>
where
    I: IntoIterator<Item = WorkerRecord>,
{
    ingest(records, "worker")
}

/// Converts demand rows into slots.
pub fn ingest_slots<I>(records: I) -> Ingested<Slot>
where
    I: IntoIterator<Item = SlotDemand>,
{
    ingest(records, "slot")
}

fn ingest<R, T, I>(records: I, kind: &'static str) -> Ingested<T>
where
    I: IntoIterator<Item = R>,
    T: TryFrom<R, Error = ValidationError>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match T::try_from(record) {
            Ok(value) => accepted.push(value),
            Err(source) => {
                tracing::warn!(kind, index, error = %source, "rejected record");
                rejected.push(RecordError { index, source });
            }
        }
    }

    Ingested { accepted, rejected }
}

/// A whole allocation run as one deserializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Roster rows, in pool order.
    pub workers: Vec<WorkerRecord>,
    /// Demand rows, in slot order.
    pub slots: Vec<SlotDemand>,
    /// Run settings; the legacy configuration when absent.
    #[serde(default)]
    pub config: AllocatorConfig,
}

/// Result of running an [`AllocationRequest`].
///
/// Slot indices in the report refer to `slots`, i.e. to the accepted
/// demand rows only.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRun {
    /// Report of the run.
    pub report: AllocationReport,
    /// Final slot states.
    pub slots: Vec<Slot>,
    /// Roster rows that never reached the allocator.
    pub rejected_workers: Vec<RecordError>,
    /// Demand rows that never reached the allocator.
    pub rejected_slots: Vec<RecordError>,
}

impl AllocationRequest {
    /// Ingests the records and runs the default allocator with the
    /// request's configuration.
    pub fn run(self) -> AllocationRun {
        self.run_with(Allocator::new())
    }

    /// Ingests the records and runs `allocator` with the request's
    /// configuration (the allocator's eligibility rule is kept).
    pub fn run_with(self, allocator: Allocator) -> AllocationRun {
        let allocator = allocator.with_config(self.config);
        let workers = ingest_workers(self.workers);
        let mut slots = ingest_slots(self.slots);

        let report = allocator.run(&workers.accepted, &mut slots.accepted);

        AllocationRun {
            report,
            slots: slots.accepted,
            rejected_workers: workers.rejected,
            rejected_slots: slots.rejected,
        }
    }
}

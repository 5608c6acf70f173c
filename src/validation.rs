//! Input validation for allocation runs.
//!
//! Field-level checks happen at construction (`Worker::new`, `Slot::new`).
//! This module adds the textual activity parser used by ingestion and a
//! pre-flight pass over a whole batch that detects:
//! - Duplicate slot identities (date and window)
//! - Duplicate worker names
//!
//! The pass is advisory; the allocator runs on any input.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{Slot, Worker};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Parses an activity written as a fraction (`"0.8"`) or a percentage
/// (`"80%"`), returning the fraction.
///
/// # Errors
/// `MalformedActivity` if the text is not a number, `ActivityOutOfRange`
/// if the fraction falls outside `[0, 1]`.
pub fn parse_activity(input: &str) -> Result<f64, ValidationError> {
    let malformed = || ValidationError::MalformedActivity {
        input: input.to_string(),
    };

    let text = input.trim();
    let value = match text.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().map_err(|_| malformed())? / 100.0,
        None => text.parse::<f64>().map_err(|_| malformed())?,
    };

    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ActivityOutOfRange { value })
    }
}

/// Validates a batch of workers and slots before a run.
///
/// Checks:
/// 1. No two workers share a name
/// 2. No two slots share a date and window
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(workers: &[Worker], slots: &[Slot]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    let mut reported_names = HashSet::new();
    for worker in workers {
        if !names.insert(worker.name.as_str()) && reported_names.insert(worker.name.as_str()) {
            errors.push(ValidationError::DuplicateWorker {
                name: worker.name.clone(),
            });
        }
    }

    let mut ids = HashSet::new();
    let mut reported_ids = HashSet::new();
    for slot in slots {
        if !ids.insert(slot.id) && reported_ids.insert(slot.id) {
            errors.push(ValidationError::DuplicateSlot {
                slot: slot.id.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

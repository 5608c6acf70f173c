//! Error types for record construction and validation.

use thiserror::Error;

/// Errors raised while constructing or validating roster and demand records.
///
/// A record that fails construction never reaches the allocator; the
/// ingestion layer is expected to reject or fix it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Activity fraction outside `[0, 1]` (or NaN).
    #[error("activity fraction must be between 0 and 1, got {value}")]
    ActivityOutOfRange { value: f64 },

    /// Activity text that is neither a fraction nor a percentage.
    #[error("malformed activity value '{input}'")]
    MalformedActivity { input: String },

    /// Date string that cannot be split into three integer components.
    #[error("date must be in the format 'DD-MM-YYYY', got '{input}'")]
    MalformedDate { input: String },

    /// Date components outside their syntactic ranges.
    #[error("date component out of range: day {day}, month {month}, year {year}")]
    DateOutOfRange { day: i64, month: i64, year: i64 },

    /// Syntactically valid date that does not exist on the calendar.
    #[error("date {input} does not exist on the calendar")]
    ImpossibleDate { input: String },

    /// Time of day that does not parse as `HH:MM`.
    #[error("time must be in the format 'HH:MM', got '{input}'")]
    MalformedTime { input: String },

    /// More initial assignees than the slot requires.
    #[error("slot requires {required} workers but {assigned} are already assigned")]
    OverAssigned { required: usize, assigned: usize },

    /// Two slots share the same identity.
    #[error("duplicate slot {slot}")]
    DuplicateSlot { slot: String },

    /// Two workers share the same name.
    #[error("duplicate worker name '{name}'")]
    DuplicateWorker { name: String },
}

impl ValidationError {
    /// Returns true if the error concerns a date component.
    pub fn is_date_error(&self) -> bool {
        matches!(
            self,
            ValidationError::MalformedDate { .. }
                | ValidationError::DateOutOfRange { .. }
                | ValidationError::ImpossibleDate { .. }
        )
    }

    /// Returns true if the error involves more than one record.
    pub fn is_cross_record(&self) -> bool {
        matches!(
            self,
            ValidationError::DuplicateSlot { .. } | ValidationError::DuplicateWorker { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::ActivityOutOfRange { value: 1.5 };
        assert_eq!(
            err.to_string(),
            "activity fraction must be between 0 and 1, got 1.5"
        );

        let err = ValidationError::OverAssigned {
            required: 1,
            assigned: 2,
        };
        assert!(err.to_string().contains("requires 1"));
    }

    #[test]
    fn test_classification() {
        assert!(ValidationError::MalformedDate { input: "x".into() }.is_date_error());
        assert!(!ValidationError::MalformedTime { input: "x".into() }.is_date_error());
        assert!(ValidationError::DuplicateWorker { name: "A".into() }.is_cross_record());
    }
}

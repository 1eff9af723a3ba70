//! Error types for lexcheck.
//!
//! All errors are strongly typed using thiserror. Invalid modality, canon,
//! or authority values are construction-time validation failures surfaced
//! to the caller; they are never silently coerced. Malformed temporal input
//! is not an error at all: it degrades to an undefined interval that never
//! overlaps anything.

use thiserror::Error;

/// Validation errors raised while constructing or parsing engine records.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A modality code other than O, P, or F.
    #[error("Unknown modality '{value}' (expected O, P, or F)")]
    InvalidModality {
        /// The rejected value.
        value: String,
    },

    /// An authority level outside the legal hierarchy.
    #[error("Unknown authority level '{value}'")]
    InvalidAuthorityLevel {
        /// The rejected value.
        value: String,
    },

    /// A canon name outside the closed canon set.
    #[error("Unknown canon '{value}'")]
    InvalidCanon {
        /// The rejected value.
        value: String,
    },

    /// A conflict type outside the closed classification set.
    #[error("Unknown conflict type '{value}'")]
    InvalidConflictType {
        /// The rejected value.
        value: String,
    },

    /// A required builder field was never set.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// Norm subject was empty or whitespace.
    #[error("Subject cannot be empty")]
    EmptySubject,

    /// Norm action was empty or whitespace.
    #[error("Action cannot be empty")]
    EmptyAction,

    /// Norm source id was empty.
    #[error("Source id cannot be empty")]
    EmptySourceId,

    /// Norm version id was empty.
    #[error("Version id cannot be empty")]
    EmptyVersionId,

    /// A score that must lie in the unit interval did not.
    #[error("Score {value} is out of range [0.0, 1.0]")]
    ScoreOutOfRange {
        /// The rejected value.
        value: f32,
    },
}

/// Result type alias for lexcheck operations.
pub type LexResult<T> = Result<T, ValidationError>;

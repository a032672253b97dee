//! Validated score increments.

use serde::Serialize;

/// Largest increment accepted in a single request unless configured otherwise.
pub const DEFAULT_MAX_INCREMENT: u64 = 1000;

/// Reasons an increment is rejected.
///
/// The messages are returned verbatim to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Increment value is required")]
    Missing,
    #[error("Increment must be a number")]
    NotANumber,
    #[error("Increment must be a whole number")]
    NotAnInteger,
    #[error("Increment must be a positive number")]
    NotPositive,
    #[error("Increment cannot exceed {max} per request")]
    ExceedsCeiling { max: u64 },
}

/// A score delta that is strictly positive and at most the configured ceiling.
///
/// Stores only accept this type, so an unchecked delta can never reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Increment(u64);

impl Increment {
    /// Validate `delta` against `ceiling`.
    pub fn new(delta: i64, ceiling: u64) -> Result<Self, ValidationError> {
        if delta <= 0 {
            return Err(ValidationError::NotPositive);
        }
        Self::from_unsigned(delta.unsigned_abs(), ceiling)
    }

    /// Validate an unsigned `delta` against `ceiling`.
    pub fn from_unsigned(delta: u64, ceiling: u64) -> Result<Self, ValidationError> {
        if delta == 0 {
            return Err(ValidationError::NotPositive);
        }
        if delta > ceiling {
            return Err(ValidationError::ExceedsCeiling { max: ceiling });
        }
        Ok(Self(delta))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

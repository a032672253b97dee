//! Raw increment validation.

use podium_primitives::{Increment, ValidationError};
use serde_json::Value;

/// Validate the `increment` field of an update request.
///
/// Checked in order: present and non-null, a JSON number, strictly positive,
/// at most `ceiling`, and integral. Integral floats such as `5.0` are
/// accepted.
pub fn parse_increment(raw: Option<&Value>, ceiling: u64) -> Result<Increment, ValidationError> {
    let number = match raw {
        None | Some(Value::Null) => return Err(ValidationError::Missing),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(ValidationError::NotANumber),
    };

    if let Some(delta) = number.as_i64() {
        return Increment::new(delta, ceiling);
    }
    if let Some(delta) = number.as_u64() {
        return Increment::from_unsigned(delta, ceiling);
    }

    let Some(delta) = number.as_f64() else {
        return Err(ValidationError::NotANumber);
    };
    if delta <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    if delta > ceiling as f64 {
        return Err(ValidationError::ExceedsCeiling { max: ceiling });
    }
    if delta.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger);
    }
    Increment::from_unsigned(delta as u64, ceiling)
}

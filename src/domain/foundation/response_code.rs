//! Signed Likert response code (-3 to +3 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// An encoded Likert answer: -3 (strongly disagree) to +3 (strongly agree).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct ResponseCode(i8);

impl ResponseCode {
    /// Lowest code on the scale.
    pub const MIN: i8 = -3;

    /// Highest code on the scale.
    pub const MAX: i8 = 3;

    /// Creates a ResponseCode from an integer, returning error if out of range.
    pub fn try_from_i8(value: i8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "response_code",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Wraps a value already known to be on the scale.
    pub(super) const fn from_scale(value: i8) -> Self {
        debug_assert!(value >= Self::MIN && value <= Self::MAX);
        Self(value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i8 {
        self.0
    }

    /// Returns -1, 0 or 1 according to the sign of the code.
    pub fn sign(&self) -> i8 {
        self.0.signum()
    }
}

impl TryFrom<i8> for ResponseCode {
    type Error = ValidationError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::try_from_i8(value)
    }
}

impl From<ResponseCode> for i8 {
    fn from(code: ResponseCode) -> Self {
        code.0
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

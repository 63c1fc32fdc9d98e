//! Screening configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::ResponseCode;
use crate::domain::screening::{
    Tolerances, UnknownAnswerPolicy, DEFAULT_ALLOWED_FAILURES, VALIDATION_GROUP_COUNT,
};

/// Largest distance two in-range codes can produce.
const MAX_DISTANCE: u8 = (ResponseCode::MAX - ResponseCode::MIN) as u8;

/// Check tolerances and the acceptance threshold
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    /// Maximum `|a + b|` for an opposite check to pass
    #[serde(default = "default_opposite_tolerance")]
    pub opposite_tolerance: u8,

    /// Maximum `|a - b|` for a same check to pass
    #[serde(default = "default_same_tolerance")]
    pub same_tolerance: u8,

    /// Maximum `|a - b|` for a direction check between same-sign answers
    #[serde(default = "default_direction_tolerance")]
    pub direction_tolerance: u8,

    /// Groups a respondent may fail and still be kept
    #[serde(default = "default_allowed_failures")]
    pub allowed_failures: u8,

    /// Handling of answers outside the label set
    #[serde(default)]
    pub unknown_answers: UnknownAnswerPolicy,
}

impl ScreeningConfig {
    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            opposite: self.opposite_tolerance,
            same: self.same_tolerance,
            direction: self.direction_tolerance,
        }
    }

    /// Validate screening configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (check, value) in [
            ("opposite", self.opposite_tolerance),
            ("same", self.same_tolerance),
            ("direction", self.direction_tolerance),
        ] {
            if value > MAX_DISTANCE {
                return Err(ValidationError::ToleranceTooLarge {
                    check,
                    value,
                    max: MAX_DISTANCE,
                });
            }
        }

        let max_failures = VALIDATION_GROUP_COUNT as u8;
        if self.allowed_failures > max_failures {
            return Err(ValidationError::AllowedFailuresTooLarge {
                value: self.allowed_failures,
                max: max_failures,
            });
        }
        Ok(())
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            opposite_tolerance: default_opposite_tolerance(),
            same_tolerance: default_same_tolerance(),
            direction_tolerance: default_direction_tolerance(),
            allowed_failures: default_allowed_failures(),
            unknown_answers: UnknownAnswerPolicy::default(),
        }
    }
}

fn default_opposite_tolerance() -> u8 {
    Tolerances::DEFAULT_OPPOSITE
}

fn default_same_tolerance() -> u8 {
    Tolerances::DEFAULT_SAME
}

fn default_direction_tolerance() -> u8 {
    Tolerances::DEFAULT_DIRECTION
}

fn default_allowed_failures() -> u8 {
    DEFAULT_ALLOWED_FAILURES
}

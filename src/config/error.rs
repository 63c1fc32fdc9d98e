//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("{check} tolerance {value} exceeds the maximum distance of {max}")]
    ToleranceTooLarge {
        check: &'static str,
        value: u8,
        max: u8,
    },

    #[error("allowed_failures {value} exceeds the number of groups ({max})")]
    AllowedFailuresTooLarge { value: u8, max: u8 },

    #[error("Expected {expected} validation groups, got {actual}")]
    GroupCount { expected: usize, actual: usize },

    #[error("Validation group id {0} is outside 1..=6")]
    GroupIdOutOfRange(u8),

    #[error("Validation group {0} is defined more than once")]
    DuplicateGroup(u8),

    #[error("Validation group {group} has an invalid question id: {reason}")]
    InvalidQuestion { group: u8, reason: String },

    #[error("Validation group {group} is malformed: {reason}")]
    InvalidGroup { group: u8, reason: String },
}

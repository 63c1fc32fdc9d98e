//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the screening domain.

mod errors;
mod ids;
mod likert_label;
mod response_code;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{GroupId, QuestionId, ResponseId};
pub use likert_label::LikertLabel;
pub use response_code::ResponseCode;
pub use timestamp::Timestamp;

//! Screening Module - the response validation engine.
//!
//! # Components
//!
//! - `encoder` - label to code mapping (signed and ordinal schemes)
//! - `check` - pairwise opposite / same / direction comparisons
//! - `policy` - per-group combination policies
//! - `group` - validation groups and their outcomes
//! - `acceptance` - failed-group count and include/exclude decision
//! - `engine` - table-level screening
//! - `report` - audit record of a batch
//!
//! Everything here is pure: no I/O, no shared mutable state.

mod acceptance;
mod check;
mod encoder;
mod engine;
mod errors;
mod group;
mod policy;
mod report;
mod respondent;
mod table;

pub use acceptance::{
    AcceptanceFilter, RespondentValidation, ScreeningSummary, DEFAULT_ALLOWED_FAILURES,
};
pub use check::{CheckEvaluator, CheckKind, CheckResult, Tolerances};
pub use encoder::{encode, encode_ordinal, OutputEncoding, Recoder};
pub use engine::{
    ScreenedTable, ScreeningEngine, ScreeningSettings, TableLayout, FAILED_COUNT_COLUMN,
    VALIDATION_GROUP_COUNT,
};
pub use errors::{EncodeError, GroupShapeError, ScreeningError};
pub use group::{GroupOutcome, SubCheck, ValidationGroup};
pub use policy::{
    AsymmetricChain, GroupPolicy, PlannedCheck, PolicyKind, SameOnly, SimpleOpposite,
};
pub use report::{GroupDefinition, RejectedRespondent, ScreeningParameters, ScreeningReport};
pub use respondent::{Answer, Respondent, UnknownAnswerPolicy};
pub use table::ResponseTable;

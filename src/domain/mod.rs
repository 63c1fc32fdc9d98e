//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `screening` - Attention-check validation engine (encoder, checks, groups, acceptance)

pub mod foundation;
pub mod screening;

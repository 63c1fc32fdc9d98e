//! Likert Screen - attention-check screening for Likert survey exports
//!
//! Each respondent answers six validation groups of paired questions.
//! Inattentive respondents give answers that contradict themselves within a
//! group; this crate counts the failed groups per respondent and keeps only
//! those within tolerance, appending the diagnostics to the output table.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Pairwise Check Evaluator - compares two encoded answers.
//!
//! Three comparison semantics exist:
//! - `opposite`: the pair should cancel out, `|a + b| <= T_opp`
//! - `same`: the pair should match, `|a - b| <= T_same`
//! - `direction`: magnitude may drift by up to `T_dir` but the sign may not flip
//!
//! All diagnostics are computed for every pair; the requested kinds only
//! decide the pass flag.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ResponseCode;

/// Comparison semantics for one pair of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Opposite,
    Same,
    Direction,
}

impl CheckKind {
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Opposite => "opposite",
            CheckKind::Same => "same",
            CheckKind::Direction => "direction",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Maximum distances tolerated by each check kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerances {
    pub opposite: u8,
    pub same: u8,
    pub direction: u8,
}

impl Tolerances {
    pub const DEFAULT_OPPOSITE: u8 = 1;
    pub const DEFAULT_SAME: u8 = 1;
    pub const DEFAULT_DIRECTION: u8 = 2;
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            opposite: Self::DEFAULT_OPPOSITE,
            same: Self::DEFAULT_SAME,
            direction: Self::DEFAULT_DIRECTION,
        }
    }
}

/// Outcome of one pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// AND of every requested kind.
    pub passed: bool,
    /// `|a + b|`
    pub opposite_distance: u8,
    /// `|a - b|`
    pub same_distance: u8,
    /// Signs agree (zero agrees with anything) and `|a - b| <= T_dir`.
    pub direction: bool,
}

impl CheckResult {
    /// The distance reported for a kind. Direction reports the same distance.
    pub fn distance(&self, kind: CheckKind) -> u8 {
        match kind {
            CheckKind::Opposite => self.opposite_distance,
            CheckKind::Same | CheckKind::Direction => self.same_distance,
        }
    }
}

/// Evaluates answer pairs against configured tolerances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckEvaluator {
    tolerances: Tolerances,
}

impl CheckEvaluator {
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Evaluates a single kind.
    pub fn evaluate(&self, a: ResponseCode, b: ResponseCode, kind: CheckKind) -> CheckResult {
        self.evaluate_all(a, b, &[kind])
    }

    /// Evaluates several kinds on the same pair; passes only if all pass.
    ///
    /// An empty kind list passes.
    pub fn evaluate_all(&self, a: ResponseCode, b: ResponseCode, kinds: &[CheckKind]) -> CheckResult {
        let same_sign = a.sign() * b.sign() >= 0;
        let a = i16::from(a.value());
        let b = i16::from(b.value());

        let opposite_distance = (a + b).unsigned_abs() as u8;
        let same_distance = (a - b).unsigned_abs() as u8;
        let direction = same_sign && same_distance <= self.tolerances.direction;

        let passed = kinds.iter().all(|kind| match kind {
            CheckKind::Opposite => opposite_distance <= self.tolerances.opposite,
            CheckKind::Same => same_distance <= self.tolerances.same,
            CheckKind::Direction => direction,
        });

        CheckResult {
            passed,
            opposite_distance,
            same_distance,
            direction,
        }
    }
}

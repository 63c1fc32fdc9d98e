//! The closed set of seven agreement labels used by the instrument.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ResponseCode;

/// Seven-point agreement label as exported by the survey platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LikertLabel {
    StronglyDisagree,
    ModeratelyDisagree,
    SlightlyDisagree,
    Neutral,
    SlightlyAgree,
    ModeratelyAgree,
    StronglyAgree,
}

impl LikertLabel {
    /// All labels from most to least disagreeing.
    pub const ALL: [LikertLabel; 7] = [
        LikertLabel::StronglyDisagree,
        LikertLabel::ModeratelyDisagree,
        LikertLabel::SlightlyDisagree,
        LikertLabel::Neutral,
        LikertLabel::SlightlyAgree,
        LikertLabel::ModeratelyAgree,
        LikertLabel::StronglyAgree,
    ];

    /// Parses the exported answer text. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.iter().copied().find(|label| label.text() == text)
    }

    /// Returns the exact answer text.
    pub fn text(&self) -> &'static str {
        match self {
            LikertLabel::StronglyDisagree => "Strongly disagree",
            LikertLabel::ModeratelyDisagree => "Moderately disagree",
            LikertLabel::SlightlyDisagree => "Slightly disagree",
            LikertLabel::Neutral => "Neither agree nor disagree",
            LikertLabel::SlightlyAgree => "Slightly agree",
            LikertLabel::ModeratelyAgree => "Moderately agree",
            LikertLabel::StronglyAgree => "Strongly agree",
        }
    }

    /// Signed code on the -3..=3 scale.
    pub fn signed_code(&self) -> ResponseCode {
        let value = match self {
            LikertLabel::StronglyDisagree => -3,
            LikertLabel::ModeratelyDisagree => -2,
            LikertLabel::SlightlyDisagree => -1,
            LikertLabel::Neutral => 0,
            LikertLabel::SlightlyAgree => 1,
            LikertLabel::ModeratelyAgree => 2,
            LikertLabel::StronglyAgree => 3,
        };
        ResponseCode::from_scale(value)
    }

    /// Ordinal code on the 1..=7 scale.
    pub fn ordinal_code(&self) -> u8 {
        (self.signed_code().value() + 4) as u8
    }
}

impl fmt::Display for LikertLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

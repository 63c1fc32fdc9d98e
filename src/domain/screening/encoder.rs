//! Response Encoder - maps exported answer text to numeric codes.
//!
//! Two schemes exist:
//! - signed: -3..=3, used by every validation check
//! - ordinal: 1..=7, with reverse-scored questions mapped to `8 - code`
//!
//! Encoding never mutates the source table. Text outside the closed label set
//! is an explicit [`EncodeError::UnknownResponseKind`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::EncodeError;
use crate::domain::foundation::{LikertLabel, ResponseCode};

/// Sum of the lowest and highest ordinal codes; `code -> 8 - code` reverses.
const ORDINAL_REVERSAL_BASE: u8 = 8;

/// Encodes one answer cell on the signed scale.
///
/// Accepts the seven agreement labels and cells that are already signed codes
/// (`"-2"`, `"3"`, `"1.0"`).
pub fn encode(text: &str) -> Result<ResponseCode, EncodeError> {
    if let Some(label) = LikertLabel::parse(text) {
        return Ok(label.signed_code());
    }

    parse_signed_code(text).ok_or_else(|| EncodeError::UnknownResponseKind {
        label: text.to_string(),
    })
}

/// Encodes one answer cell on the ordinal 1..=7 scale.
pub fn encode_ordinal(text: &str, reverse_scored: bool) -> Result<u8, EncodeError> {
    let label = LikertLabel::parse(text).ok_or_else(|| EncodeError::UnknownResponseKind {
        label: text.to_string(),
    })?;

    let code = label.ordinal_code();
    if reverse_scored {
        Ok(ORDINAL_REVERSAL_BASE - code)
    } else {
        Ok(code)
    }
}

fn parse_signed_code(text: &str) -> Option<ResponseCode> {
    let text = text.trim();
    let value = match text.parse::<i8>() {
        Ok(value) => value,
        Err(_) => {
            // Numeric exports with gaps come out as floats ("2.0").
            let float = text.parse::<f64>().ok()?;
            if float.fract() != 0.0 || float.abs() > f64::from(ResponseCode::MAX) {
                return None;
            }
            float as i8
        }
    };
    ResponseCode::try_from_i8(value).ok()
}

/// How answer cells are written to the screened output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    /// Keep the exported text unchanged.
    #[default]
    Labels,
    /// Replace labels with signed codes.
    Signed,
    /// Replace labels with ordinal codes, honouring reverse scoring.
    Ordinal,
}

/// Re-encodes answer cells of the output table.
#[derive(Debug, Clone, Default)]
pub struct Recoder {
    encoding: OutputEncoding,
    reverse_scored: HashSet<String>,
}

impl Recoder {
    pub fn new(encoding: OutputEncoding) -> Self {
        Self {
            encoding,
            reverse_scored: HashSet::new(),
        }
    }

    /// Marks the given columns as reverse scored (ordinal scheme only).
    pub fn with_reverse_scored<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reverse_scored = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the replacement for a cell, or `None` to keep it as-is.
    ///
    /// Only cells holding one of the seven labels are replaced.
    pub fn recode(&self, column: &str, cell: &str) -> Option<String> {
        match self.encoding {
            OutputEncoding::Labels => None,
            OutputEncoding::Signed => LikertLabel::parse(cell)
                .map(|label| label.signed_code().to_string()),
            OutputEncoding::Ordinal => {
                encode_ordinal(cell, self.reverse_scored.contains(column))
                    .ok()
                    .map(|code| code.to_string())
            }
        }
    }
}

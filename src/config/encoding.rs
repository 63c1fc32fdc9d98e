//! Output encoding configuration

use serde::Deserialize;

use crate::domain::screening::{OutputEncoding, Recoder};

/// How answer cells are written to the screened table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncodingConfig {
    /// `labels` keeps the text, `signed` writes -3..=3, `ordinal` writes 1..=7
    #[serde(default)]
    pub output: OutputEncoding,

    /// Columns written as `8 - code` under ordinal output
    #[serde(default)]
    pub reverse_scored: Vec<String>,
}

impl EncodingConfig {
    pub fn recoder(&self) -> Recoder {
        Recoder::new(self.output).with_reverse_scored(self.reverse_scored.iter().cloned())
    }
}

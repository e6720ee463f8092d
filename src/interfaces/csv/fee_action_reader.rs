use crate::error::{PayFeesError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum FeeActionType {
    Add,
    Remove,
}

/// One row of a fee actions file: `action, fee_code`.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct FeeAction {
    pub action: FeeActionType,
    pub fee_code: String,
}

/// Reads fee actions from a CSV source.
///
/// Whitespace around fields is trimmed and rows may carry extra columns.
pub struct FeeActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> FeeActionReader<R> {
    /// Wraps `source`. The first row must be the `action, fee_code` header.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one entry per row. A row with an unknown action or a missing fee
    /// code yields an error without ending the stream.
    pub fn actions(self) -> impl Iterator<Item = Result<FeeAction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayFeesError::from))
    }
}

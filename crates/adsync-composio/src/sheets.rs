//! Spreadsheet operations: clear a range, then write rows into it.

use std::future::Future;

use crate::client::ComposioClient;
use crate::error::ActionError;
use crate::types::{ClearValuesInput, SheetRange, UpdateValuesInput, CLEAR_VALUES, UPDATE_VALUES};

/// Write side of the pipeline. Both calls mutate shared external state and
/// are not transactional: a crash between clear and write leaves the range
/// empty until the next successful run.
pub trait SheetSink {
    fn clear_range(&self, range: &SheetRange)
        -> impl Future<Output = Result<(), ActionError>> + Send;

    /// Writes `rows` verbatim (no formula evaluation) starting at the
    /// top-left cell of `range`.
    fn write_values(
        &self,
        range: &SheetRange,
        rows: &[Vec<String>],
    ) -> impl Future<Output = Result<(), ActionError>> + Send;
}

impl SheetSink for ComposioClient {
    async fn clear_range(&self, range: &SheetRange) -> Result<(), ActionError> {
        let input = ClearValuesInput {
            spreadsheet_id: &range.spreadsheet_id,
            range: &range.range,
        };
        self.execute(CLEAR_VALUES, &self.sheets_entity_id, &input).await?;
        Ok(())
    }

    async fn write_values(
        &self,
        range: &SheetRange,
        rows: &[Vec<String>],
    ) -> Result<(), ActionError> {
        let input = UpdateValuesInput {
            spreadsheet_id: &range.spreadsheet_id,
            range: &range.range,
            values: rows,
            value_input_option: "RAW",
        };
        self.execute(UPDATE_VALUES, &self.sheets_entity_id, &input).await?;
        Ok(())
    }
}

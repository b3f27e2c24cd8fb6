//! CSV ingestion: one header row, then one `SalesRecord` per data row.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::debug_log;
use crate::error::{SalesError, SalesResult};
use crate::types::SalesRecord;

/// Load a CSV export from disk.
///
/// Fails with `SourceNotFound` before touching the parser when the file is absent.
pub fn load_csv_path(path: impl AsRef<Path>) -> SalesResult<Vec<SalesRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SalesError::SourceNotFound(path.to_path_buf()));
    }

    let _span = debug_log::TimedSpan::new("LOAD", path.display().to_string());
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// Parse CSV from any reader. The first malformed row aborts the whole load.
pub fn load_from_reader<R: Read>(reader: R) -> SalesResult<Vec<SalesRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let fields: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(row.iter().map(str::to_string))
            .collect();

        let record = SalesRecord::from_row(&fields).map_err(|e| e.at_row(index + 1))?;
        records.push(record);
    }

    debug_log::log("LOAD", "parsed", &format!("{} records", records.len()));
    Ok(records)
}

//! Reading a previously written CSV sink back into rows

use crate::output::{OutputColumn, OutputError, OutputResult, Row, Value, WidthSource};
use std::collections::HashMap;
use std::path::Path;

/// Reads a CSV file with a header row into rows keyed by header
///
/// Every value comes back as text.
pub fn read_csv(path: &Path) -> OutputResult<Vec<Row>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<HashMap<String, String>>() {
        let row: Row = record?
            .into_iter()
            .map(|(k, v)| (k, Value::Text(v)))
            .collect();
        rows.push(row);
    }

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Number of columns a replayed table shows
pub const REPLAY_COLUMNS: usize = 2;

/// Builds the replay table's columns from the first two keys of the first
/// row in reverse sorted order, each sized from that key's values across
/// all rows
///
/// For a `Spell,Description` file this yields `Spell` then `Description`.
/// Further header keys are left out of the table.
pub fn replay_columns(rows: &[Row]) -> OutputResult<Vec<(String, OutputColumn)>> {
    let first = rows
        .first()
        .ok_or_else(|| OutputError::NoRecords("CSV input".to_string()))?;

    let mut keys: Vec<&String> = first.keys().collect();
    if keys.len() < REPLAY_COLUMNS {
        return Err(OutputError::TooFewColumns {
            expected: REPLAY_COLUMNS,
            found: keys.len(),
        });
    }
    keys.sort_unstable_by(|a, b| b.cmp(a));

    keys.into_iter()
        .take(REPLAY_COLUMNS)
        .map(|key| {
            let column = OutputColumn::new(key.as_str(), WidthSource::record_field(rows, key))?;
            Ok::<_, OutputError>((key.clone(), column))
        })
        .collect()
}

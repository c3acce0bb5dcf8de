use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::ReportError;

use super::model::{CellValue, ResultRow, ResultTable, INSTANCE_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a results file written by the benchmark harness.
///
/// Layout: `;`-separated, one header row, one row per instance:
///
/// ```text
/// Instance;SINGLE Value;Nb cols; Durations(s);MULTI Value;Nb cols;Duration(s)
/// uniform_1;812.0000;41;0.52;812.0000;97;0.31
/// uniform_2;1430.1000(TLR);388;60.04;1429.7000;1024;12.80
/// ```
///
/// A missing file is reported as [`ReportError::MissingInput`] so callers can
/// skip the report instead of failing.
pub fn load_results(path: &Path) -> Result<ResultTable, ReportError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReportError::MissingInput {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let table = read_results(file, path)?;
    log::debug!(
        "loaded {} rows from {} with columns {:?}",
        table.len(),
        path.display(),
        table.column_names
    );
    Ok(table)
}

/// Parse a results table from any reader. `source` only labels errors.
pub fn read_results<R: Read>(input: R, source: &Path) -> Result<ResultTable, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = unique_headers(reader.headers()?.iter());

    let instance_idx = headers
        .iter()
        .position(|h| h == INSTANCE_COLUMN)
        .ok_or_else(|| ReportError::MissingColumn {
            column: INSTANCE_COLUMN.to_string(),
            path: source.to_path_buf(),
        })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;

        let instance = record.get(instance_idx).unwrap_or("").trim().to_string();
        let mut cells = BTreeMap::new();
        for (col_idx, col_name) in headers.iter().enumerate() {
            if col_idx == instance_idx {
                continue;
            }
            let value = record.get(col_idx).map(CellValue::parse).unwrap_or(CellValue::Null);
            cells.insert(col_name.clone(), value);
        }

        rows.push(ResultRow { instance, cells });
    }

    Ok(ResultTable::new(source, headers, rows))
}

/// Trim header names and suffix repeated names with `.1`, `.2`, …
///
/// The harness writes `Nb cols` once per variant; the first occurrence keeps
/// its name so single-variant lookups still work.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|h| {
        let name = h.trim().to_string();
        let count = seen.entry(name.clone()).or_insert(0);
        let unique = if *count == 0 {
            name
        } else {
            format!("{name}.{count}")
        };
        *count += 1;
        unique
    })
    .collect()
}

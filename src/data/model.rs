use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// Name of the column holding the instance identifier.
pub const INSTANCE_COLUMN: &str = "Instance";

// ---------------------------------------------------------------------------
// CellValue – a single cell of a result table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, typed the way the harness writes them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "nan"),
        }
    }
}

impl CellValue {
    /// Type a raw CSV field: empty → Null, then integer, float, text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    /// Numeric view of the cell. Percent strings such as `"3.20%"` yield `3.2`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.strip_suffix('%')?.trim().parse().ok(),
            CellValue::Null => None,
        }
    }

    /// The cell rendered as text, `"nan"` for empty cells.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ResultRow – one benchmarked instance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ResultRow {
    /// Value of the `Instance` column, e.g. `uniform_12`.
    pub instance: String,
    /// Every other column: column_name → value.
    pub cells: BTreeMap<String, CellValue>,
}

impl ResultRow {
    pub fn get(&self, column: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.cells.get(column).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// ResultTable – a complete results file
// ---------------------------------------------------------------------------

/// A parsed results file.
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub rows: Vec<ResultRow>,
    /// Header names in file order, trimmed and made unique.
    pub column_names: Vec<String>,
    /// File the table was read from, used in error messages.
    pub source: PathBuf,
}

impl ResultTable {
    pub fn new(source: &Path, column_names: Vec<String>, rows: Vec<ResultRow>) -> Self {
        ResultTable {
            rows,
            column_names,
            source: source.to_path_buf(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Rename columns. Pairs whose source column is absent are ignored; an
    /// existing column with the target name is replaced.
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        for &(from, to) in renames {
            if from == to || !self.has_column(from) {
                continue;
            }
            self.column_names.retain(|c| c != to);
            for name in &mut self.column_names {
                if name == from {
                    *name = to.to_string();
                }
            }
            for row in &mut self.rows {
                row.cells.remove(to);
                if let Some(value) = row.cells.remove(from) {
                    row.cells.insert(to.to_string(), value);
                }
            }
            log::debug!("renamed column '{from}' -> '{to}'");
        }
    }

    /// Numeric values of `column` for the given rows. Empty cells become NaN.
    pub fn numeric_column(&self, column: &str, rows: &[usize]) -> Result<Vec<f64>, ReportError> {
        if !self.has_column(column) {
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
                path: self.source.clone(),
            });
        }
        rows.iter()
            .map(|&idx| {
                let row = &self.rows[idx];
                let cell = row.get(column);
                if cell.is_null() {
                    return Ok(f64::NAN);
                }
                cell.as_f64().ok_or_else(|| ReportError::NotNumeric {
                    column: column.to_string(),
                    row: idx,
                    instance: row.instance.clone(),
                    value: cell.as_text(),
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Instance names
// ---------------------------------------------------------------------------

/// Trailing run of ASCII digits in an instance name, 0 when there is none.
/// `uniform_12` → 12, `clustered` → 0. Numbers too large for `u64` saturate.
pub fn instance_number(name: &str) -> u64 {
    let digits_start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);
    // only digits remain, so parsing fails on overflow alone
    digits_start
        .map(|start| name[start..].parse().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Axis label for an instance: the text after the last `_`.
pub fn short_label(name: &str) -> &str {
    match name.rsplit_once('_') {
        Some((_, suffix)) => suffix,
        None => name,
    }
}

/// Order row indices by instance number, then by name.
pub fn sort_by_instance_number(table: &ResultTable, rows: &mut [usize]) {
    rows.sort_by(|&a, &b| {
        let (na, nb) = (&table.rows[a].instance, &table.rows[b].instance);
        instance_number(na)
            .cmp(&instance_number(nb))
            .then_with(|| na.cmp(nb))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn table(instances: &[&str]) -> ResultTable {
        let rows = instances
            .iter()
            .map(|name| ResultRow {
                instance: name.to_string(),
                cells: BTreeMap::new(),
            })
            .collect();
        ResultTable::new(Path::new("t.csv"), vec![INSTANCE_COLUMN.into()], rows)
    }

    #[test_case("uniform_12", 12; "underscore suffix")]
    #[test_case("uniform12", 12; "glued suffix")]
    #[test_case("clustered", 0; "no digits")]
    #[test_case("2d_instance", 0; "leading digits only")]
    #[test_case("", 0; "empty")]
    #[test_case("huge_123456789012345678901234", u64::MAX; "overflow saturates")]
    fn trailing_number(name: &str, expected: u64) {
        assert_eq!(instance_number(name), expected);
    }

    #[test]
    fn sorts_numerically_not_lexically() {
        let t = table(&["uniform_10", "uniform_2", "uniform_1", "clustered_2"]);
        let mut rows: Vec<usize> = (0..t.len()).collect();
        sort_by_instance_number(&t, &mut rows);
        let names: Vec<&str> = rows.iter().map(|&i| t.rows[i].instance.as_str()).collect();
        assert_eq!(names, ["uniform_1", "clustered_2", "uniform_2", "uniform_10"]);
    }

    #[test]
    fn oversized_numbers_sort_last() {
        let t = table(&["uniform_99999999999999999999", "uniform_3"]);
        let mut rows: Vec<usize> = (0..t.len()).collect();
        sort_by_instance_number(&t, &mut rows);
        assert_eq!(rows, [1, 0]);
    }

    #[test]
    fn short_labels() {
        assert_eq!(short_label("uniform_12"), "12");
        assert_eq!(short_label("a_b_c"), "c");
        assert_eq!(short_label("plain"), "plain");
    }

    #[test]
    fn cell_typing() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse(" 42 "), CellValue::Integer(42));
        assert_eq!(CellValue::parse("1.50"), CellValue::Float(1.5));
        assert_eq!(
            CellValue::parse("12.0000(TLR)"),
            CellValue::Text("12.0000(TLR)".into())
        );
        assert_eq!(CellValue::parse("3.20%").as_f64(), Some(3.2));
        assert_eq!(CellValue::parse("CRASH").as_f64(), None);
    }

    #[test]
    fn rename_replaces_header_and_cells() {
        let mut t = table(&["a_1"]);
        t.column_names.push("Nb cols".into());
        t.rows[0]
            .cells
            .insert("Nb cols".into(), CellValue::Integer(7));
        t.rename_columns(&[("Nb cols", "Nb cols MIP"), ("absent", "x")]);
        assert!(t.has_column("Nb cols MIP"));
        assert!(!t.has_column("Nb cols"));
        assert!(!t.has_column("x"));
        assert_eq!(t.rows[0].get("Nb cols MIP"), &CellValue::Integer(7));
    }

    #[test]
    fn numeric_column_maps_null_to_nan_and_rejects_text() {
        let mut t = table(&["a_1", "a_2", "a_3"]);
        t.column_names.push("v".into());
        t.rows[0].cells.insert("v".into(), CellValue::Float(1.0));
        t.rows[1].cells.insert("v".into(), CellValue::Null);
        t.rows[2].cells.insert("v".into(), CellValue::Text("CRASH".into()));

        let ok = t.numeric_column("v", &[0, 1]).unwrap();
        assert_eq!(ok[0], 1.0);
        assert!(ok[1].is_nan());

        let err = t.numeric_column("v", &[2]).unwrap_err();
        assert!(matches!(err, ReportError::NotNumeric { row: 2, .. }));
        assert!(matches!(
            t.numeric_column("w", &[0]),
            Err(ReportError::MissingColumn { .. })
        ));
    }
}

use super::model::{CellValue, ResultRow, ResultTable};

/// Suffix the harness appends to a solved value when the time limit was hit.
pub const TIME_LIMIT_MARKER: &str = "(TLR)";

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Whether a solved-value cell carries the time-limit-reached marker.
pub fn is_time_limit_reached(cell: &CellValue) -> bool {
    cell.as_text().contains(TIME_LIMIT_MARKER)
}

/// A predicate on one column of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowFilter {
    /// Drop rows whose cell text contains `marker`.
    ExcludeMarker { column: String, marker: String },
    /// Keep only rows whose cell text is exactly one of `values`.
    RequireOneOf { column: String, values: Vec<String> },
}

impl RowFilter {
    /// Drop rows whose `column` was cut off by the time limit.
    pub fn solved(column: &str) -> Self {
        RowFilter::ExcludeMarker {
            column: column.to_string(),
            marker: TIME_LIMIT_MARKER.to_string(),
        }
    }

    pub fn one_of(column: &str, values: &[&str]) -> Self {
        RowFilter::RequireOneOf {
            column: column.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            RowFilter::ExcludeMarker { column, .. } | RowFilter::RequireOneOf { column, .. } => {
                column
            }
        }
    }

    /// A row without the column passes an exclusion and fails an inclusion.
    pub fn accepts(&self, row: &ResultRow) -> bool {
        match self {
            RowFilter::ExcludeMarker { column, marker } => {
                let cell = row.get(column);
                if marker == TIME_LIMIT_MARKER {
                    !is_time_limit_reached(cell)
                } else {
                    !cell.as_text().contains(marker.as_str())
                }
            }
            RowFilter::RequireOneOf { column, values } => {
                let text = row.get(column).as_text();
                values.iter().any(|v| *v == text)
            }
        }
    }
}

/// Return indices of rows that pass every filter, in table order.
pub fn filtered_rows(table: &ResultTable, filters: &[RowFilter]) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| filters.iter().all(|f| f.accepts(row)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::data::loader::read_results;

    const CSV: &str = "\
Instance;MIP Value;Nb cols;Durations(s);DP Value;Nb cols;Duration(s)
uniform_1;10.0000;4;0.10;10.0000;5;0.05
uniform_2;20.0000(TLR);40;60.10;19.5000;50;3.00
uniform_3;30.0000;9;1.00;30.5000(TLR);12;60.20
uniform_4;CRASH;;;;;
";

    fn table() -> ResultTable {
        read_results(CSV.as_bytes(), Path::new("mip_vs_dp.csv")).unwrap()
    }

    #[test]
    fn marker_detection() {
        assert!(is_time_limit_reached(&CellValue::Text("5.0000(TLR)".into())));
        assert!(!is_time_limit_reached(&CellValue::Float(5.0)));
        assert!(!is_time_limit_reached(&CellValue::Null));
    }

    #[test]
    fn time_limited_rows_are_excluded() {
        let t = table();
        let rows = filtered_rows(&t, &[RowFilter::solved("MIP Value")]);
        assert_eq!(rows, [0, 2, 3]);

        let both = filtered_rows(&t, &[RowFilter::solved("MIP Value"), RowFilter::solved("DP Value")]);
        assert_eq!(both, [0, 3]);
    }

    #[test]
    fn solved_filter_follows_marker_detection() {
        let t = table();
        let filter = RowFilter::solved("DP Value");
        for row in &t.rows {
            assert_eq!(filter.accepts(row), !is_time_limit_reached(row.get("DP Value")));
        }
    }

    #[test]
    fn other_markers_match_as_text() {
        let t = table();
        let filter = RowFilter::ExcludeMarker {
            column: "MIP Value".into(),
            marker: "CRASH".into(),
        };
        assert_eq!(filtered_rows(&t, &[filter]), [0, 1, 2]);
    }

    #[test]
    fn one_of_keeps_listed_statuses_only() {
        let t = table();
        let rows = filtered_rows(&t, &[RowFilter::one_of("MIP Value", &["CRASH"])]);
        assert_eq!(rows, [3]);
        let none = filtered_rows(&t, &[RowFilter::one_of("absent", &["x"])]);
        assert!(none.is_empty());
    }

    #[test]
    fn no_filters_keep_everything() {
        let t = table();
        assert_eq!(filtered_rows(&t, &[]), [0, 1, 2, 3]);
    }
}

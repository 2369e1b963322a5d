//! Missing-value patterns of a table.

use crate::table::Table;

/// Present/missing counts of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNullity {
    pub name: String,
    pub present: usize,
    pub missing: usize,
}

impl ColumnNullity {
    /// Fraction of missing entries (0.0 for an empty column).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn missing_ratio(&self) -> f64 {
        let total = self.present + self.missing;
        if total == 0 {
            0.0
        } else {
            self.missing as f64 / total as f64
        }
    }
}

/// Per-column nullity counts for a whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullitySummary {
    pub row_count: usize,
    /// Rows without a single missing value.
    pub complete_rows: usize,
    pub columns: Vec<ColumnNullity>,
}

impl NullitySummary {
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|column| {
                let missing = column.missing_count();
                ColumnNullity {
                    name: column.name().to_owned(),
                    present: column.len() - missing,
                    missing,
                }
            })
            .collect();
        let complete_rows = (0..table.row_count())
            .filter(|&row| table.columns().iter().all(|c| c.values()[row].is_some()))
            .count();
        Self {
            row_count: table.row_count(),
            complete_rows,
            columns,
        }
    }
}

/// Missing ratio per column per band of consecutive rows.
///
/// This is the compact form of a nullity matrix: instead of one cell per row,
/// rows are grouped into at most `bands` equal bands so that the matrix fits a
/// fixed display height.
#[derive(Debug, Clone, PartialEq)]
pub struct NullityMatrix {
    /// Row position ranges covered by each band.
    pub bands: Vec<std::ops::Range<usize>>,
    /// `cells[column][band]` is the missing ratio of that column in that band.
    pub cells: Vec<Vec<f64>>,
}

impl NullityMatrix {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table(table: &Table, bands: usize) -> Self {
        let rows = table.row_count();
        let band_count = bands.min(rows);
        let bands = (0..band_count)
            .map(|i| (i * rows / band_count)..((i + 1) * rows / band_count))
            .collect::<Vec<_>>();
        let cells = table
            .columns()
            .iter()
            .map(|column| {
                bands
                    .iter()
                    .map(|band| {
                        let missing = column.values()[band.clone()]
                            .iter()
                            .filter(|v| v.is_none())
                            .count();
                        missing as f64 / band.len() as f64
                    })
                    .collect()
            })
            .collect();
        Self { bands, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::from_values("DEPTH", [1.0, 2.0, 3.0, 4.0]),
            Column::new("GR", [None, None, Some(1.0), Some(2.0)]),
            Column::new("RHOB", [Some(2.5), None, Some(2.6), Some(2.7)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let summary = NullitySummary::from_table(&sample_table());
        assert_eq!(summary.row_count, 4);
        assert_eq!(summary.complete_rows, 2);
        assert_eq!(summary.columns[1].missing, 2);
        assert_eq!(summary.columns[1].present, 2);
        assert_eq!(summary.columns[1].missing_ratio(), 0.5);
        assert_eq!(summary.columns[0].missing_ratio(), 0.0);
    }

    #[test]
    fn test_matrix_bands() {
        let matrix = NullityMatrix::from_table(&sample_table(), 2);
        assert_eq!(matrix.bands, vec![0..2, 2..4]);
        assert_eq!(matrix.cells[1], vec![1.0, 0.0]);
        assert_eq!(matrix.cells[2], vec![0.5, 0.0]);
    }

    #[test]
    fn test_matrix_never_has_more_bands_than_rows() {
        let matrix = NullityMatrix::from_table(&sample_table(), 100);
        assert_eq!(matrix.bands.len(), 4);
        let empty = Table::new(vec![]).unwrap();
        assert!(NullityMatrix::from_table(&empty, 10).bands.is_empty());
    }
}

//! Tabular summaries: per-column statistics and head/tail previews.

use lasview_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};

use crate::table::Table;

const QUARTILES: [f64; 3] = [25.0, 50.0, 75.0];

/// Summary row for one column, in the layout of a classic `describe()` report.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    /// Number of present values.
    pub count: usize,
    /// `None` when the column has no present values.
    pub stats: Option<DescriptiveStats>,
    /// 25th, 50th and 75th percentiles, `None` when nothing is present.
    pub quartiles: Option<Percentiles>,
}

impl ColumnSummary {
    #[must_use]
    pub fn quartile(&self, percentile: f64) -> Option<f64> {
        self.quartiles.as_ref()?.get(percentile)
    }
}

/// Describes every column of the table.
#[must_use]
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .map(|column| {
            let mut sorted = column.present().collect::<Vec<_>>();
            sorted.sort_by(f64::total_cmp);
            let stats = DescriptiveStats::from_sorted(&sorted);
            let quartiles = stats
                .is_some()
                .then(|| Percentiles::from_sorted(&sorted, &QUARTILES));
            ColumnSummary {
                name: column.name().to_owned(),
                count: sorted.len(),
                stats,
                quartiles,
            }
        })
        .collect()
}

/// A contiguous slice of rows for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePreview {
    pub column_names: Vec<String>,
    /// Row identities of the previewed rows.
    pub index: Vec<usize>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl TablePreview {
    /// First `n` rows.
    #[must_use]
    pub fn head(table: &Table, n: usize) -> Self {
        Self::rows(table, 0..n)
    }

    /// Last `n` rows.
    #[must_use]
    pub fn tail(table: &Table, n: usize) -> Self {
        let rows = table.row_count();
        Self::rows(table, rows.saturating_sub(n)..rows)
    }

    fn rows(table: &Table, range: std::ops::Range<usize>) -> Self {
        let range = table.clamp_rows(range);
        Self {
            column_names: table.column_names().map(str::to_owned).collect(),
            index: table.index()[range.clone()].to_vec(),
            rows: range.filter_map(|row| table.row(row)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::from_values("DEPTH", [1.0, 2.0, 3.0, 4.0, 5.0]),
            Column::new("GR", [None, Some(10.0), Some(20.0), Some(30.0), Some(40.0)]),
            Column::new("NPHI", [None; 5]),
        ])
        .unwrap()
    }

    #[test]
    fn test_describe_counts_present_values() {
        let summaries = describe(&sample_table());
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[1].count, 4);
        let stats = summaries[1].stats.as_ref().unwrap();
        assert_eq!(stats.mean, 25.0);
        assert_eq!(summaries[1].quartile(25.0), Some(17.5));
        assert_eq!(summaries[1].quartile(50.0), Some(25.0));
    }

    #[test]
    fn test_describe_all_missing_column() {
        let summaries = describe(&sample_table());
        assert_eq!(summaries[2].count, 0);
        assert!(summaries[2].stats.is_none());
        assert_eq!(summaries[2].quartile(50.0), None);
    }

    #[test]
    fn test_head_and_tail() {
        let table = sample_table();
        let head = TablePreview::head(&table, 2);
        assert_eq!(head.index, vec![1, 2]);
        assert_eq!(head.rows[1], vec![Some(2.0), Some(10.0), None]);

        let tail = TablePreview::tail(&table, 2);
        assert_eq!(tail.index, vec![4, 5]);

        let all = TablePreview::tail(&table, 50);
        assert_eq!(all.index.len(), 5);
    }
}

//! In-memory tabular dataset.
//!
//! A [`Table`] is an ordered list of equally long [`Column`]s plus a 1-based
//! row index. Missing measurements are stored as `None`; `NaN` inputs are
//! normalized to `None` on construction so that there is a single missing
//! marker throughout the crate.

use std::ops::Range;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column '{column}' has {len} values, expected {expected}")]
    LengthMismatch {
        column: String,
        len: usize,
        expected: usize,
    },
    #[display("duplicate column name '{column}'")]
    DuplicateColumn { column: String },
    #[display("row index has {len} entries, expected {expected}")]
    IndexLengthMismatch { len: usize, expected: usize },
}

/// A named sequence of measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

impl Column {
    /// Creates a column from optional values; `Some(NaN)` is stored as missing.
    #[must_use]
    pub fn new<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = values
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect();
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a column from raw values, treating `NaN` as missing.
    #[must_use]
    pub fn from_values<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::new(name, values.into_iter().map(Some))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the present (non-missing) values in row order.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    #[must_use]
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    /// Observed `(min, max)` over present values, `None` if nothing is present.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        min_max(self.present())
    }
}

/// Ordered collection of equally long columns with a stable row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<usize>,
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table whose row index runs `1..=n`.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let rows = columns.first().map_or(0, Column::len);
        Self::with_index((1..=rows).collect(), columns)
    }

    /// Creates a table with an explicit row index.
    pub fn with_index(index: Vec<usize>, columns: Vec<Column>) -> Result<Self, TableError> {
        let expected = columns.first().map_or(index.len(), Column::len);
        if index.len() != expected {
            return Err(TableError::IndexLengthMismatch {
                len: index.len(),
                expected,
            });
        }
        for (i, column) in columns.iter().enumerate() {
            if column.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    len: column.len(),
                    expected,
                });
            }
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(TableError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self { index, columns })
    }

    /// Builds a table from parts already known to be consistent.
    pub(crate) fn from_parts(index: Vec<usize>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == index.len()));
        Self { index, columns }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row identities, 1-based.
    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    /// Values of one row by position (not by index), in column order.
    #[must_use]
    pub fn row(&self, position: usize) -> Option<Vec<Option<f64>>> {
        (position < self.row_count())
            .then(|| self.columns.iter().map(|c| c.values[position]).collect())
    }

    /// Row positions clamped to the table.
    #[must_use]
    pub fn clamp_rows(&self, rows: Range<usize>) -> Range<usize> {
        let end = rows.end.min(self.row_count());
        rows.start.min(end)..end
    }
}

/// `(min, max)` of the values, ignoring `NaN`.
fn min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })
}

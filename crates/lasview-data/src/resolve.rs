//! Missing-value resolution.
//!
//! [`resolve`] turns a [`Table`] plus a [`Selection`] into a [`ResolvedTable`]
//! holding only the selected columns, with every missing entry either removed
//! (row deletion) or filled (imputation). The input table is never modified.

use std::collections::BTreeMap;

use lasview_stats::descriptive;

use crate::{
    selection::Selection,
    table::{Column, Table},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ResolveError {
    #[display("cannot compute {strategy} for column '{column}': no values present")]
    InsufficientData {
        column: String,
        strategy: &'static str,
    },
    #[display("no imputation strategy given for column '{column}'")]
    MissingStrategy { column: String },
    #[display("fill value for column '{column}' must be a number")]
    InvalidFillValue { column: String },
    #[display("selected column '{column}' not found in table")]
    UnknownColumn { column: String },
}

/// How a single column's missing entries are filled.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Mean of the column's present values.
    Mean,
    /// Median of the column's present values.
    Median,
    /// A caller-supplied constant.
    FixedValue(f64),
    /// The constant `0`.
    Zero,
}

impl FillStrategy {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::FixedValue(_) => "fixed value",
            Self::Zero => "zero",
        }
    }

    fn fill_value(self, column: &Column) -> Result<f64, ResolveError> {
        let value = match self {
            Self::Mean => descriptive::mean(column.present()),
            Self::Median => descriptive::median(column.present()),
            Self::FixedValue(v) => {
                if v.is_nan() {
                    return Err(ResolveError::InvalidFillValue {
                        column: column.name().to_owned(),
                    });
                }
                Some(v)
            }
            Self::Zero => Some(0.0),
        };
        value.ok_or_else(|| ResolveError::InsufficientData {
            column: column.name().to_owned(),
            strategy: self.label(),
        })
    }
}

/// Scope of an imputation: one strategy for everything, or one per column.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Imputation {
    Global(FillStrategy),
    PerColumn(BTreeMap<String, FillStrategy>),
}

impl Imputation {
    fn strategy_for(&self, column: &str) -> Result<FillStrategy, ResolveError> {
        match self {
            Self::Global(strategy) => Ok(*strategy),
            Self::PerColumn(map) => {
                map.get(column)
                    .copied()
                    .ok_or_else(|| ResolveError::MissingStrategy {
                        column: column.to_owned(),
                    })
            }
        }
    }
}

/// What to do with missing values in the selected columns.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Drop every row with a missing value in any selected column.
    DeleteRows,
    /// Fill missing values column by column.
    Impute(Imputation),
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::Impute(Imputation::Global(FillStrategy::Mean))
    }
}

impl ResolutionPolicy {
    /// Short human-readable description.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::DeleteRows => "delete rows with missing values".to_owned(),
            Self::Impute(Imputation::Global(FillStrategy::FixedValue(v))) => {
                format!("impute all columns with {v}")
            }
            Self::Impute(Imputation::Global(strategy)) => {
                format!("impute all columns with {}", strategy.label())
            }
            Self::Impute(Imputation::PerColumn(map)) => {
                let parts = map
                    .iter()
                    .map(|(column, strategy)| match strategy {
                        FillStrategy::FixedValue(v) => format!("{column}={v}"),
                        _ => format!("{column}={}", strategy.label()),
                    })
                    .collect::<Vec<_>>();
                format!("impute per column ({})", parts.join(", "))
            }
        }
    }
}

/// A selected column with every value present.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    name: String,
    values: Vec<f64>,
}

impl ResolvedColumn {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Selected columns after missing-value resolution.
///
/// Values are plain `f64`s, so a missing entry cannot be represented. Row
/// identities are carried over from the source table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTable {
    index: Vec<usize>,
    columns: Vec<ResolvedColumn>,
}

impl ResolvedTable {
    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    #[must_use]
    pub fn columns(&self) -> &[ResolvedColumn] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(ResolvedColumn::name)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Converts back into a [`Table`] with the same row index.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::from_values(c.name.clone(), c.values.iter().copied()))
            .collect();
        Table::from_parts(self.index.clone(), columns)
    }
}

/// Resolves the missing values of the selected columns.
///
/// Columns are processed in selection order and independently of each other.
/// Only the selected columns appear in the result.
pub fn resolve(
    table: &Table,
    selection: &Selection,
    policy: &ResolutionPolicy,
) -> Result<ResolvedTable, ResolveError> {
    let columns = selection
        .iter()
        .map(|name| {
            table
                .column(name)
                .ok_or_else(|| ResolveError::UnknownColumn {
                    column: name.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match policy {
        ResolutionPolicy::DeleteRows => Ok(delete_rows(table, &columns)),
        ResolutionPolicy::Impute(imputation) => {
            let columns = columns
                .into_iter()
                .map(|column| impute_column(column, imputation.strategy_for(column.name())?))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ResolvedTable {
                index: table.index().to_vec(),
                columns,
            })
        }
    }
}

fn delete_rows(table: &Table, columns: &[&Column]) -> ResolvedTable {
    let keep = (0..table.row_count())
        .filter(|&row| columns.iter().all(|c| c.values()[row].is_some()))
        .collect::<Vec<_>>();

    let index = keep.iter().map(|&row| table.index()[row]).collect();
    let columns = columns
        .iter()
        .map(|column| ResolvedColumn {
            name: column.name().to_owned(),
            values: keep.iter().filter_map(|&row| column.values()[row]).collect(),
        })
        .collect();
    ResolvedTable { index, columns }
}

fn impute_column(column: &Column, strategy: FillStrategy) -> Result<ResolvedColumn, ResolveError> {
    let values = if column.has_missing() {
        let fill = strategy.fill_value(column)?;
        column.values().iter().map(|v| v.unwrap_or(fill)).collect()
    } else {
        column.present().collect()
    };
    Ok(ResolvedColumn {
        name: column.name().to_owned(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::from_values("DEPTH", [1.0, 2.0, 3.0]),
            Column::from_values("GR", [100.0, 110.0, f64::NAN]),
            Column::from_values("RHOB", [f64::NAN, 2.5, 2.6]),
        ])
        .unwrap()
    }

    fn gr_rhob(table: &Table) -> Selection {
        Selection::select(table, &["GR", "RHOB"]).unwrap()
    }

    fn per_column(entries: &[(&str, FillStrategy)]) -> ResolutionPolicy {
        ResolutionPolicy::Impute(Imputation::PerColumn(
            entries
                .iter()
                .map(|(name, s)| ((*name).to_owned(), *s))
                .collect(),
        ))
    }

    #[test]
    fn test_delete_rows_keeps_original_index() {
        let table = sample_table();
        let resolved = resolve(&table, &gr_rhob(&table), &ResolutionPolicy::DeleteRows).unwrap();
        assert_eq!(resolved.index(), &[2]);
        assert_eq!(resolved.column("GR").unwrap().values(), &[110.0]);
        assert_eq!(resolved.column("RHOB").unwrap().values(), &[2.5]);
        assert!(resolved.column("DEPTH").is_none());
    }

    #[test]
    fn test_delete_rows_only_looks_at_selection() {
        let table = sample_table();
        let selection = Selection::select(&table, &["DEPTH", "RHOB"]).unwrap();
        let resolved = resolve(&table, &selection, &ResolutionPolicy::DeleteRows).unwrap();
        assert_eq!(resolved.index(), &[2, 3]);
    }

    #[test]
    fn test_per_column_median() {
        let table = sample_table();
        let policy = per_column(&[("GR", FillStrategy::Median), ("RHOB", FillStrategy::Median)]);
        let resolved = resolve(&table, &gr_rhob(&table), &policy).unwrap();

        assert_eq!(resolved.index(), &[1, 2, 3]);
        let gr = resolved.column("GR").unwrap().values();
        assert_eq!(&gr[..2], &[100.0, 110.0]);
        assert!((gr[2] - 105.0).abs() < 1e-12);
        let rhob = resolved.column("RHOB").unwrap().values();
        assert!((rhob[0] - 2.55).abs() < 1e-12);
        assert_eq!(&rhob[1..], &[2.5, 2.6]);
        // The source table is untouched.
        assert_eq!(table.column("RHOB").unwrap().values()[0], None);
    }

    #[test]
    fn test_mixed_strategies_do_not_cross_columns() {
        let table = sample_table();
        let policy = per_column(&[
            ("GR", FillStrategy::FixedValue(-1.0)),
            ("RHOB", FillStrategy::Mean),
        ]);
        let resolved = resolve(&table, &gr_rhob(&table), &policy).unwrap();
        assert_eq!(resolved.column("GR").unwrap().values(), &[100.0, 110.0, -1.0]);
        let rhob = resolved.column("RHOB").unwrap().values();
        assert!((rhob[0] - 2.55).abs() < 1e-12);
    }

    #[test]
    fn test_per_column_requires_every_selected_column() {
        let table = sample_table();
        let policy = per_column(&[("GR", FillStrategy::Zero)]);
        let err = resolve(&table, &gr_rhob(&table), &policy).unwrap_err();
        assert!(matches!(err, ResolveError::MissingStrategy { column } if column == "RHOB"));
    }

    #[test]
    fn test_global_zero() {
        let table = sample_table();
        let policy = ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Zero));
        let resolved = resolve(&table, &gr_rhob(&table), &policy).unwrap();
        assert_eq!(resolved.column("GR").unwrap().values(), &[100.0, 110.0, 0.0]);
        assert_eq!(resolved.column("RHOB").unwrap().values(), &[0.0, 2.5, 2.6]);
    }

    #[test]
    fn test_all_missing_column() {
        let table = Table::new(vec![Column::new("NPHI", [None, None])]).unwrap();
        let selection = Selection::all(&table);

        for strategy in [FillStrategy::Mean, FillStrategy::Median] {
            let policy = ResolutionPolicy::Impute(Imputation::Global(strategy));
            let err = resolve(&table, &selection, &policy).unwrap_err();
            assert!(matches!(err, ResolveError::InsufficientData { .. }));
        }
        for (strategy, fill) in [(FillStrategy::Zero, 0.0), (FillStrategy::FixedValue(0.3), 0.3)] {
            let policy = ResolutionPolicy::Impute(Imputation::Global(strategy));
            let resolved = resolve(&table, &selection, &policy).unwrap();
            assert_eq!(resolved.column("NPHI").unwrap().values(), &[fill, fill]);
        }
    }

    #[test]
    fn test_nan_fill_value_is_rejected() {
        let table = sample_table();
        let policy =
            ResolutionPolicy::Impute(Imputation::Global(FillStrategy::FixedValue(f64::NAN)));
        let err = resolve(&table, &gr_rhob(&table), &policy).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidFillValue { .. }));
    }

    #[test]
    fn test_imputation_never_overwrites_present_values() {
        let table = sample_table();
        let policy = ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Mean));
        let selection = Selection::all(&table);
        let resolved = resolve(&table, &selection, &policy).unwrap();
        for column in table.columns() {
            let filled = resolved.column(column.name()).unwrap().values();
            for (before, after) in column.values().iter().zip(filled) {
                if let Some(before) = before {
                    assert_eq!(before, after);
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = sample_table();
        let selection = Selection::all(&table);
        for policy in [
            ResolutionPolicy::DeleteRows,
            ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Median)),
        ] {
            let once = resolve(&table, &selection, &policy).unwrap();
            let resolved_table = once.to_table();
            let again =
                resolve(&resolved_table, &Selection::all(&resolved_table), &policy).unwrap();
            assert_eq!(once, again);
        }
    }

    #[test]
    fn test_empty_selection_is_empty_result() {
        let table = sample_table();
        let resolved =
            resolve(&table, &Selection::default(), &ResolutionPolicy::DeleteRows).unwrap();
        assert_eq!(resolved.column_count(), 0);
        assert_eq!(resolved.row_count(), 3);
    }

    #[test]
    fn test_policy_json_shape() {
        let policy: ResolutionPolicy = serde_json::from_str(
            r#"{"impute": {"per_column": {"GR": "median", "RHOB": {"fixed_value": 2.5}}}}"#,
        )
        .unwrap();
        assert_eq!(
            policy,
            per_column(&[
                ("GR", FillStrategy::Median),
                ("RHOB", FillStrategy::FixedValue(2.5)),
            ])
        );
        let policy: ResolutionPolicy = serde_json::from_str(r#""delete_rows""#).unwrap();
        assert_eq!(policy, ResolutionPolicy::DeleteRows);
    }
}

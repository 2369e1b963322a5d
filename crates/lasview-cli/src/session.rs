//! User choices and the selection/resolution pipeline that consumes them.

use std::collections::BTreeMap;

use anyhow::Context as _;
use lasview_data::{
    resolve::{self, ResolutionPolicy, ResolveError, ResolvedTable},
    selection::{ALL_COLUMNS, Selection, SelectionError},
    table::Table,
};
use lasview_plot::{axis::AxisRange, log_track::PlotSpec};

/// Source of the choices that drive one pass through the pipeline.
///
/// The terminal UI answers from its widget state; batch commands answer from
/// a [`SessionInputs`] record.
pub trait InputProvider {
    /// Column names as requested, possibly containing [`ALL_COLUMNS`].
    fn requested_columns(&self) -> &[String];
    fn policy(&self) -> &ResolutionPolicy;
    fn boxplot_log_columns(&self) -> &[String];
    /// Track columns; `None` means "use the defaults".
    fn track_columns(&self) -> Option<&[String]>;
    /// Depth column; `None` means "use the first resolved column".
    fn depth_column(&self) -> Option<&str>;
    fn track_log_columns(&self) -> &[String];
    fn track_ranges(&self) -> BTreeMap<String, AxisRange>;
    /// Range override for the current depth column only.
    fn depth_range(&self) -> Option<AxisRange>;
}

/// Closed `[min, max]` interval as written in a session file.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Default, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoxplotInputs {
    pub log_columns: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogPlotInputs {
    pub x_columns: Option<Vec<String>>,
    pub y_column: Option<String>,
    pub log_columns: Vec<String>,
    pub x_ranges: BTreeMap<String, ValueRange>,
    /// Range of `y_column` (or of the default depth column), shown with `max`
    /// at the bottom of the plot.
    pub y_range: Option<ValueRange>,
}

/// Choices loaded from a JSON session file.
///
/// ```json
/// {
///   "columns": ["DEPTH", "GR", "RHOB"],
///   "policy": { "impute": { "per_column": { "GR": "median", "RHOB": { "fixed_value": 2.65 } } } },
///   "boxplot": { "log_columns": ["RHOB"] },
///   "log_plot": { "y_column": "DEPTH", "y_range": { "min": 1500.0, "max": 1600.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionInputs {
    pub columns: Vec<String>,
    pub policy: ResolutionPolicy,
    pub boxplot: BoxplotInputs,
    pub log_plot: LogPlotInputs,
}

impl Default for SessionInputs {
    fn default() -> Self {
        Self {
            columns: vec![ALL_COLUMNS.to_owned()],
            policy: ResolutionPolicy::default(),
            boxplot: BoxplotInputs::default(),
            log_plot: LogPlotInputs::default(),
        }
    }
}

impl SessionInputs {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Invalid session JSON")
    }
}

impl InputProvider for SessionInputs {
    fn requested_columns(&self) -> &[String] {
        &self.columns
    }

    fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    fn boxplot_log_columns(&self) -> &[String] {
        &self.boxplot.log_columns
    }

    fn track_columns(&self) -> Option<&[String]> {
        self.log_plot.x_columns.as_deref()
    }

    fn depth_column(&self) -> Option<&str> {
        self.log_plot.y_column.as_deref()
    }

    fn track_log_columns(&self) -> &[String] {
        &self.log_plot.log_columns
    }

    fn track_ranges(&self) -> BTreeMap<String, AxisRange> {
        self.log_plot
            .x_ranges
            .iter()
            .map(|(name, r)| (name.clone(), AxisRange::new(r.min, r.max)))
            .collect()
    }

    fn depth_range(&self) -> Option<AxisRange> {
        self.log_plot
            .y_range
            .map(|r| AxisRange::new(r.max, r.min))
    }
}

/// Track columns used when none are chosen: the second and third columns.
#[must_use]
pub fn default_track_columns(resolved: &ResolvedTable) -> Vec<String> {
    resolved
        .column_names()
        .skip(1)
        .take(2)
        .map(str::to_owned)
        .collect()
}

/// Depth column used when none is chosen: the first column.
#[must_use]
pub fn default_depth_column(resolved: &ResolvedTable) -> Option<String> {
    resolved.column_names().next().map(str::to_owned)
}

#[derive(Debug)]
struct CachedResolution {
    selection: Selection,
    policy: ResolutionPolicy,
    resolved: ResolvedTable,
}

/// Owns the loaded table and remembers the last resolution.
///
/// Resolving again with the same selection and policy returns the cached
/// table; any other key replaces the cache.
#[derive(Debug)]
pub struct Pipeline {
    table: Table,
    cache: Option<CachedResolution>,
}

impl Pipeline {
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self { table, cache: None }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn select<S>(&self, requested: &[S]) -> Result<Selection, SelectionError>
    where
        S: AsRef<str>,
    {
        Selection::select(&self.table, requested)
    }

    pub fn resolve(
        &mut self,
        selection: &Selection,
        policy: &ResolutionPolicy,
    ) -> Result<&ResolvedTable, ResolveError> {
        let entry = match self.cache.take() {
            Some(entry) if entry.selection == *selection && entry.policy == *policy => entry,
            _ => CachedResolution {
                resolved: resolve::resolve(&self.table, selection, policy)?,
                selection: selection.clone(),
                policy: policy.clone(),
            },
        };
        Ok(&self.cache.insert(entry).resolved)
    }

    /// Result of the last [`Self::resolve`] call, `None` if it failed.
    #[must_use]
    pub fn cached(&self) -> Option<&ResolvedTable> {
        self.cache.as_ref().map(|c| &c.resolved)
    }

    #[cfg(test)]
    fn is_cached(&self, selection: &Selection, policy: &ResolutionPolicy) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|c| c.selection == *selection && c.policy == *policy)
    }

    /// Selects and resolves according to `inputs`.
    pub fn run<P>(&mut self, inputs: &P) -> anyhow::Result<&ResolvedTable>
    where
        P: InputProvider + ?Sized,
    {
        let selection = self
            .select(inputs.requested_columns())
            .context("Failed to select columns")?;
        let resolved = self
            .resolve(&selection, inputs.policy())
            .with_context(|| format!("Failed to {}", inputs.policy().describe()))?;
        Ok(resolved)
    }
}

/// Builds the log-plot request for `resolved`, filling in default columns.
pub fn plot_spec<'a, P>(resolved: &'a ResolvedTable, inputs: &P) -> PlotSpec<'a>
where
    P: InputProvider + ?Sized,
{
    let x_columns = inputs
        .track_columns()
        .map_or_else(|| default_track_columns(resolved), <[String]>::to_vec);
    let y_column = inputs
        .depth_column()
        .map(str::to_owned)
        .or_else(|| default_depth_column(resolved))
        .unwrap_or_default();
    PlotSpec::new(resolved, &x_columns, y_column)
        .log_columns(inputs.track_log_columns().iter().cloned())
        .x_ranges(inputs.track_ranges())
        .y_range(inputs.depth_range())
}

//! Well-log track figures.
//!
//! A log plot puts every measurement column in its own narrow track, side by
//! side, with depth running down the shared vertical axis.

use std::collections::{BTreeMap, BTreeSet};

use lasview_data::resolve::{ResolvedColumn, ResolvedTable};

use crate::{
    RenderError,
    axis::{self, AxisRange, AxisSpec, Scale},
    palette::{self, Rgb},
};

/// Horizontal gap between adjacent tracks, as a fraction of a track's width.
pub const TRACK_SPACING: f64 = 0.05;
/// Stroke width of a track's curve.
pub const LINE_WIDTH: f64 = 0.5;

/// Everything needed to draw a log plot.
#[derive(Debug, Clone)]
pub struct PlotSpec<'a> {
    table: &'a ResolvedTable,
    x_columns: Vec<String>,
    y_column: String,
    log_columns: BTreeSet<String>,
    x_ranges: BTreeMap<String, AxisRange>,
    y_range: Option<AxisRange>,
}

impl<'a> PlotSpec<'a> {
    pub fn new<S>(table: &'a ResolvedTable, x_columns: &[S], y_column: impl Into<String>) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            table,
            x_columns: x_columns.iter().map(|s| s.as_ref().to_owned()).collect(),
            y_column: y_column.into(),
            log_columns: BTreeSet::new(),
            x_ranges: BTreeMap::new(),
            y_range: None,
        }
    }

    /// Draws the named columns on a logarithmic x-axis.
    #[must_use]
    pub fn log_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn x_range(mut self, column: impl Into<String>, range: AxisRange) -> Self {
        self.x_ranges.insert(column.into(), range);
        self
    }

    #[must_use]
    pub fn x_ranges(mut self, ranges: BTreeMap<String, AxisRange>) -> Self {
        self.x_ranges.extend(ranges);
        self
    }

    #[must_use]
    pub fn y_range(mut self, range: Option<AxisRange>) -> Self {
        self.y_range = range;
        self
    }

    #[must_use]
    pub fn table(&self) -> &'a ResolvedTable {
        self.table
    }

    #[must_use]
    pub fn x_columns(&self) -> &[String] {
        &self.x_columns
    }

    #[must_use]
    pub fn y_column(&self) -> &str {
        &self.y_column
    }

    #[must_use]
    pub fn is_log(&self, column: &str) -> bool {
        self.log_columns.contains(column)
    }

    fn column(&self, name: &str) -> Result<&'a ResolvedColumn, RenderError> {
        self.table
            .column(name)
            .ok_or_else(|| RenderError::UnknownColumn {
                column: name.to_owned(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    Top,
}

/// One measurement track.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Track {
    pub column: String,
    pub color: Rgb,
    pub x_axis: AxisSpec,
    /// `(value, depth)` pairs in row order. Values outside the x scale's domain
    /// are left out.
    pub points: Vec<(f64, f64)>,
    pub show_y_tick_labels: bool,
    pub x_label_position: LabelPosition,
    pub grid: bool,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LogTrackFigure {
    pub y_column: String,
    /// Shared depth axis. Inverted by default so depth grows downward.
    pub y_axis: AxisSpec,
    pub tracks: Vec<Track>,
    pub spacing: f64,
}

impl LogTrackFigure {
    #[must_use]
    pub fn track(&self, column: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.column == column)
    }
}

pub fn render_log_tracks(spec: &PlotSpec<'_>) -> Result<LogTrackFigure, RenderError> {
    if spec.x_columns.is_empty() {
        return Err(RenderError::EmptyTrackSet);
    }
    let depth = spec.column(&spec.y_column)?;
    let x_columns = spec
        .x_columns
        .iter()
        .map(|name| spec.column(name))
        .collect::<Result<Vec<_>, _>>()?;

    let y_range = spec.y_range.unwrap_or_else(|| {
        axis::data_range(depth.values().iter().copied(), Scale::Linear)
            .unwrap_or_else(|| axis::fallback_range(Scale::Linear))
            .inverted()
    });
    let colors = palette::colorblind(x_columns.len());

    let tracks = x_columns
        .into_iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (column, color))| {
            let scale = if spec.is_log(column.name()) {
                Scale::Log
            } else {
                Scale::Linear
            };
            let values = column.values();
            let points = values
                .iter()
                .zip(depth.values())
                .filter(|(x, _)| scale.transform(**x).is_some())
                .map(|(&x, &y)| (x, y))
                .collect();
            Track {
                column: column.name().to_owned(),
                color,
                x_axis: AxisSpec::new(x_range(spec, column.name(), values, scale), scale),
                points,
                show_y_tick_labels: i == 0,
                x_label_position: LabelPosition::Top,
                grid: true,
                line_width: LINE_WIDTH,
            }
        })
        .collect();

    Ok(LogTrackFigure {
        y_column: spec.y_column.clone(),
        y_axis: AxisSpec::new(y_range, Scale::Linear),
        tracks,
        spacing: TRACK_SPACING,
    })
}

/// The override for `column` if usable on `scale`, otherwise the data range.
fn x_range(spec: &PlotSpec<'_>, column: &str, values: &[f64], scale: Scale) -> AxisRange {
    spec.x_ranges
        .get(column)
        .copied()
        .filter(|r| scale.transform(r.from).is_some() && scale.transform(r.to).is_some())
        .or_else(|| axis::data_range(values.iter().copied(), scale))
        .unwrap_or_else(|| axis::fallback_range(scale))
}

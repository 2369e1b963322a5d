use lasview_data::resolve::ResolvedTable;
use lasview_stats::boxplot::{BoxSummary, DEFAULT_WHISKER_COEF};

use crate::{
    RenderError,
    axis::{self, AxisSpec, Scale},
    palette::{self, Rgb},
};

/// Fraction of the value range added above and below each panel's data.
const PANEL_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
}

/// How individual points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub fill: Rgb,
    pub edge: Rgb,
}

/// Red filled circle with a white edge, distinct from the box outline.
pub const OUTLIER_MARKER: MarkerStyle = MarkerStyle {
    shape: MarkerShape::Circle,
    fill: palette::OUTLIER_FILL,
    edge: palette::OUTLIER_EDGE,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Title {
    pub text: String,
    pub bold: bool,
}

/// Drawable box-and-whisker glyph.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BoxGlyph {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl From<BoxSummary> for BoxGlyph {
    fn from(summary: BoxSummary) -> Self {
        Self {
            q1: summary.q1,
            median: summary.median,
            q3: summary.q3,
            whisker_low: summary.whisker_low,
            whisker_high: summary.whisker_high,
            outliers: summary.outliers,
        }
    }
}

/// One column's subplot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BoxplotPanel {
    pub column: String,
    pub title: Title,
    /// `None` when the column has no rows (e.g. every row was deleted).
    pub glyph: Option<BoxGlyph>,
    pub y_axis: AxisSpec,
}

/// A single row of independently scaled box plots.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BoxplotFigure {
    pub panels: Vec<BoxplotPanel>,
    pub outlier_marker: MarkerStyle,
}

impl BoxplotFigure {
    /// Subplot grid as `(rows, columns)`.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (1, self.panels.len())
    }
}

/// Renders one box plot per column of `table`, in column order.
///
/// Columns named in `log_columns` get a logarithmic y-axis; the others stay
/// linear.
pub fn render_boxplots<S>(
    table: &ResolvedTable,
    log_columns: &[S],
) -> Result<BoxplotFigure, RenderError>
where
    S: AsRef<str>,
{
    if table.column_count() == 0 {
        return Err(RenderError::EmptyColumnSet);
    }
    if let Some(unknown) = log_columns
        .iter()
        .map(AsRef::as_ref)
        .find(|name| table.column(name).is_none())
    {
        return Err(RenderError::UnknownColumn {
            column: unknown.to_owned(),
        });
    }

    let panels = table
        .columns()
        .iter()
        .map(|column| {
            let scale = if log_columns.iter().any(|c| c.as_ref() == column.name()) {
                Scale::Log
            } else {
                Scale::Linear
            };
            let values = column.values();
            let range = axis::data_range(values.iter().copied(), scale)
                .unwrap_or_else(|| axis::fallback_range(scale));
            BoxplotPanel {
                column: column.name().to_owned(),
                title: Title {
                    text: column.name().to_owned(),
                    bold: true,
                },
                glyph: BoxSummary::new(values.iter().copied(), DEFAULT_WHISKER_COEF)
                    .map(BoxGlyph::from),
                y_axis: AxisSpec::new(range, scale).padded(PANEL_MARGIN),
            }
        })
        .collect();

    Ok(BoxplotFigure {
        panels,
        outlier_marker: OUTLIER_MARKER,
    })
}

#[cfg(test)]
mod tests {
    use lasview_data::{
        resolve::{self, ResolutionPolicy},
        selection::Selection,
        table::{Column, Table},
    };

    use super::*;

    fn resolved() -> ResolvedTable {
        let table = Table::new(vec![
            Column::from_values("GR", [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 90.0]),
            Column::from_values("RT", [0.5, 1.0, 10.0, 100.0, 2.0, 3.0, 4.0]),
            Column::from_values("NPHI", [0.1, 0.2, 0.3, 0.25, 0.15, 0.2, 0.22]),
        ])
        .unwrap();
        resolve::resolve(&table, &Selection::all(&table), &ResolutionPolicy::DeleteRows).unwrap()
    }

    #[test]
    fn test_one_panel_per_column_in_order() {
        let figure = render_boxplots::<&str>(&resolved(), &[]).unwrap();
        let names = figure.panels.iter().map(|p| p.column.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["GR", "RT", "NPHI"]);
        assert_eq!(figure.grid(), (1, 3));
        assert!(figure.panels.iter().all(|p| p.title.bold));
    }

    #[test]
    fn test_log_flag_is_panel_local() {
        let figure = render_boxplots(&resolved(), &["RT"]).unwrap();
        assert_eq!(figure.panels[0].y_axis.scale, Scale::Linear);
        assert_eq!(figure.panels[1].y_axis.scale, Scale::Log);
        assert_eq!(figure.panels[2].y_axis.scale, Scale::Linear);
    }

    #[test]
    fn test_outliers_and_marker() {
        let figure = render_boxplots::<&str>(&resolved(), &[]).unwrap();
        let glyph = figure.panels[0].glyph.as_ref().unwrap();
        assert_eq!(glyph.outliers, vec![90.0]);
        assert_eq!(glyph.whisker_high, 15.0);
        assert_eq!(figure.outlier_marker.fill, palette::OUTLIER_FILL);
        assert_ne!(figure.outlier_marker.fill, figure.outlier_marker.edge);
    }

    #[test]
    fn test_panels_are_scaled_independently() {
        let figure = render_boxplots::<&str>(&resolved(), &[]).unwrap();
        let gr = figure.panels[0].y_axis.range;
        let nphi = figure.panels[2].y_axis.range;
        assert!(gr.lower() < 10.0 && gr.upper() > 90.0);
        assert!(nphi.lower() < 0.1 && nphi.upper() < 1.0);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let err = render_boxplots::<&str>(&ResolvedTable::default(), &[]).unwrap_err();
        assert!(matches!(err, RenderError::EmptyColumnSet));
    }

    #[test]
    fn test_unknown_log_column() {
        let err = render_boxplots(&resolved(), &["DT"]).unwrap_err();
        assert!(matches!(err, RenderError::UnknownColumn { column } if column == "DT"));
    }
}

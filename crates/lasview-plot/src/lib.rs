//! Figure models for resolved well-log tables.
//!
//! Renderers in this crate turn a [`ResolvedTable`](lasview_data::resolve::ResolvedTable)
//! into a complete, backend-independent description of a figure: panel order,
//! axis ranges and scales, colors, marker styles and the data points to draw.
//! Drawing the figure (terminal, JSON, image) is left to the caller.
//!
//! - [`boxplot::render_boxplots`]: one box-and-whisker panel per column
//! - [`log_track::render_log_tracks`]: side-by-side tracks over a shared depth axis
//!
//! Both renderers report misuse through [`RenderError`]; an empty column or
//! track set is an error the caller is expected to show as a notice.

pub mod axis;
pub mod boxplot;
pub mod log_track;
pub mod palette;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("no columns to plot")]
    EmptyColumnSet,
    #[display("no tracks to plot")]
    EmptyTrackSet,
    #[display("column '{column}' not found in table")]
    UnknownColumn { column: String },
}

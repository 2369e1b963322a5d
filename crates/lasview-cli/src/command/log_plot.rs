use std::path::PathBuf;

use lasview_plot::{
    RenderError,
    log_track::{self, LogTrackFigure},
};

use crate::{
    session::{self, InputProvider, Pipeline},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LogPlotArg {
    /// LAS file path
    las_file: PathBuf,
    /// Session file with the column selection, missing-value policy and track settings
    #[arg(long)]
    session: Option<PathBuf>,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &LogPlotArg) -> anyhow::Result<()> {
    let LogPlotArg {
        las_file,
        session,
        output,
    } = arg;

    let las = util::read_las_file(las_file)?;
    let inputs = util::read_session_file(session.as_deref())?;

    let mut pipeline = Pipeline::new(las.table);
    let Some(figure) = build_figure(&mut pipeline, &inputs)? else {
        return Ok(());
    };
    util::write_figure(&figure, output.as_deref())
}

/// Resolves and renders; `None` when there are no tracks to draw.
fn build_figure<P>(pipeline: &mut Pipeline, inputs: &P) -> anyhow::Result<Option<LogTrackFigure>>
where
    P: InputProvider,
{
    eprintln!("Resolving missing values ({})...", inputs.policy().describe());
    let resolved = pipeline.run(inputs)?;
    eprintln!("Resolved {} rows", resolved.row_count());

    match log_track::render_log_tracks(&session::plot_spec(resolved, inputs)) {
        Ok(figure) => {
            eprintln!(
                "Rendered {} tracks against {}",
                figure.tracks.len(),
                figure.y_column
            );
            Ok(Some(figure))
        }
        Err(e @ (RenderError::EmptyColumnSet | RenderError::EmptyTrackSet)) => {
            eprintln!("Nothing to plot: {e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

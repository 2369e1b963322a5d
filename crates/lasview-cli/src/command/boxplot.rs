use std::path::PathBuf;

use lasview_plot::{
    RenderError,
    boxplot::{self, BoxplotFigure},
};

use crate::{
    session::{InputProvider, Pipeline},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BoxplotArg {
    /// LAS file path
    las_file: PathBuf,
    /// Session file with the column selection and missing-value policy
    #[arg(long)]
    session: Option<PathBuf>,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &BoxplotArg) -> anyhow::Result<()> {
    let BoxplotArg {
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

/// Resolves and renders; `None` when no columns are selected.
fn build_figure<P>(pipeline: &mut Pipeline, inputs: &P) -> anyhow::Result<Option<BoxplotFigure>>
where
    P: InputProvider,
{
    eprintln!("Resolving missing values ({})...", inputs.policy().describe());
    let resolved = pipeline.run(inputs)?;
    eprintln!("Resolved {} rows", resolved.row_count());

    match boxplot::render_boxplots(resolved, inputs.boxplot_log_columns()) {
        Ok(figure) => {
            eprintln!("Rendered {} panels", figure.panels.len());
            Ok(Some(figure))
        }
        Err(e @ RenderError::EmptyColumnSet) => {
            eprintln!("Nothing to plot: {e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use lasview_data::table::{Column, Table};

    use crate::session::SessionInputs;

    use super::*;

    fn pipeline() -> Pipeline {
        Pipeline::new(
            Table::new(vec![
                Column::from_values("DEPTH", [1.0, 2.0, 3.0]),
                Column::new("GR", [Some(10.0), None, Some(30.0)]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let inputs = SessionInputs {
            columns: vec![],
            ..SessionInputs::default()
        };
        assert!(build_figure(&mut pipeline(), &inputs).unwrap().is_none());
    }

    #[test]
    fn test_figure_for_session() {
        let figure = build_figure(&mut pipeline(), &SessionInputs::default())
            .unwrap()
            .unwrap();
        assert_eq!(figure.panels.len(), 2);
    }

    #[test]
    fn test_unknown_log_column_is_an_error() {
        let mut inputs = SessionInputs::default();
        inputs.boxplot.log_columns = vec!["RHOB".to_owned()];
        assert!(build_figure(&mut pipeline(), &inputs).is_err());
    }
}

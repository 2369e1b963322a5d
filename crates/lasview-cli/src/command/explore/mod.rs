use std::path::PathBuf;

use anyhow::Context as _;

use crate::{tui::Runtime, util};

use self::app::ExplorerApp;

mod app;
mod view;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ExploreArg {
    /// LAS file path
    las_file: PathBuf,
    /// Session file with the initial column selection, policy and plot settings
    #[arg(long)]
    session: Option<PathBuf>,
}

pub fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let ExploreArg { las_file, session } = arg;

    let las = util::read_las_file(las_file)?;
    let inputs = util::read_session_file(session.as_deref())?;

    let file_name = las_file
        .file_name()
        .map_or_else(|| las_file.display().to_string(), |n| n.to_string_lossy().into_owned());
    let title = match las.well_item("WELL").filter(|item| !item.value.is_empty()) {
        Some(well) => format!("{file_name} ({})", well.value),
        None => file_name,
    };

    let mut app = ExplorerApp::new(title, las.table, &inputs);
    Runtime::new()
        .run(&mut app)
        .context("Terminal UI failed")?;
    Ok(())
}

use clap::{Parser, Subcommand};

use self::{
    boxplot::BoxplotArg, describe::DescribeArg, explore::ExploreArg, log_plot::LogPlotArg,
};

mod boxplot;
mod describe;
mod explore;
mod log_plot;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Explore a LAS file in the terminal
    Explore(#[clap(flatten)] ExploreArg),
    /// Print the well header, column statistics and missing-value counts
    Describe(#[clap(flatten)] DescribeArg),
    /// Write a box plot figure as JSON
    Boxplot(#[clap(flatten)] BoxplotArg),
    /// Write a well-log track figure as JSON
    LogPlot(#[clap(flatten)] LogPlotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Boxplot(arg) => boxplot::run(&arg)?,
        Mode::LogPlot(arg) => log_plot::run(&arg)?,
    }
    Ok(())
}

use std::path::PathBuf;

use lasview_data::{
    describe::{self, ColumnSummary, TablePreview},
    las::HeaderItem,
    nullity::NullitySummary,
};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// LAS file path
    las_file: PathBuf,
    /// Number of rows shown at the head and tail of the data
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

pub fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg { las_file, rows } = arg;

    let las = util::read_las_file(las_file)?;
    let table = &las.table;

    println!("Well information");
    print_header_items(&las.well);
    println!();
    println!("Curves");
    print_header_items(&las.curves);
    println!();

    println!(
        "{} rows x {} columns",
        table.row_count(),
        table.column_count()
    );
    println!();

    println!("Statistics");
    print_summary_table(&describe::describe(table));
    println!();

    println!("Missing values");
    print_nullity_table(&NullitySummary::from_table(table));
    println!();

    println!("First {rows} rows");
    print_preview(&TablePreview::head(table, *rows));
    println!();
    println!("Last {rows} rows");
    print_preview(&TablePreview::tail(table, *rows));

    Ok(())
}

fn print_header_items(items: &[HeaderItem]) {
    for item in items {
        println!(
            "  {:<8} {:<8} {:<30} {}",
            item.mnemonic, item.unit, item.value, item.description
        );
    }
}

fn print_summary_table(summaries: &[ColumnSummary]) {
    println!(
        "  {:<12} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max",
    );
    println!("  {}", "-".repeat(12 + 8 + 12 * 7 + 8));
    for summary in summaries {
        let fmt = |v: Option<f64>| v.map_or("N/A".to_string(), |v| format!("{v:.3}"));
        let stats = summary.stats.as_ref();
        println!(
            "  {:<12} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            summary.name,
            summary.count,
            fmt(stats.map(|s| s.mean)),
            fmt(stats.map(|s| s.sample_std_dev).filter(|s| !s.is_nan())),
            fmt(stats.map(|s| s.min)),
            fmt(summary.quartile(25.0)),
            fmt(summary.quartile(50.0)),
            fmt(summary.quartile(75.0)),
            fmt(stats.map(|s| s.max)),
        );
    }
}

fn print_nullity_table(nullity: &NullitySummary) {
    println!(
        "  {:<12} {:>8} {:>8} {:>9}",
        "Column", "Present", "Missing", "Missing%"
    );
    println!("  {}", "-".repeat(12 + 8 + 8 + 9 + 3));
    for column in &nullity.columns {
        println!(
            "  {:<12} {:>8} {:>8} {:>8.1}%",
            column.name,
            column.present,
            column.missing,
            column.missing_ratio() * 100.0
        );
    }
    println!(
        "  {} of {} rows have no missing values",
        nullity.complete_rows, nullity.row_count
    );
}

fn print_preview(preview: &TablePreview) {
    print!("  {:>6}", "#");
    for name in &preview.column_names {
        print!(" {name:>12}");
    }
    println!();
    for (index, row) in preview.index.iter().zip(&preview.rows) {
        print!("  {index:>6}");
        for value in row {
            match value {
                Some(v) => print!(" {v:>12.3}"),
                None => print!(" {:>12}", "NaN"),
            }
        }
        println!();
    }
}

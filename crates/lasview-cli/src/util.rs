use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use lasview_data::las::LasFile;

use crate::session::SessionInputs;

/// Writes a figure as pretty-printed JSON to `path`, or to stdout when no
/// path is given.
pub fn write_figure<T>(figure: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let Some(path) = path else {
        return write_json(io::stdout().lock(), figure).context("Failed to write figure to stdout");
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_json(BufWriter::new(file), figure)
        .with_context(|| format!("Failed to write figure to {}", path.display()))?;
    eprintln!("Wrote figure to {}", path.display());
    Ok(())
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads and parses a LAS file, reporting progress on stderr.
pub fn read_las_file<P>(path: P) -> anyhow::Result<LasFile>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    eprintln!("Loading LAS file from {}...", path.display());
    // LAS files are ASCII by definition, but stray Latin-1 bytes in
    // descriptions are common.
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read LAS file: {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let las = LasFile::parse(&text)
        .with_context(|| format!("Failed to parse LAS file: {}", path.display()))?;
    eprintln!(
        "Loaded {} rows, {} columns",
        las.table.row_count(),
        las.table.column_count()
    );
    Ok(las)
}

/// Reads the session file if one is given, otherwise returns the defaults.
pub fn read_session_file(path: Option<&Path>) -> anyhow::Result<SessionInputs> {
    let Some(path) = path else {
        return Ok(SessionInputs::default());
    };
    eprintln!("Loading session from {}...", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    SessionInputs::from_json(&text)
        .with_context(|| format!("Failed to load session file: {}", path.display()))
}

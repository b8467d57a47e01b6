//! Result sinks: CSV files and console output.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use comfy_table::{presets, Table};

use crate::models::PaperRow;

/// Errors raised while writing results
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Nothing to write, so no header row can be derived
    #[error("No records to write")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How rows are printed to the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    /// One `Field: value | ...` line per record
    #[default]
    Plain,
    /// One JSON object per line
    Json,
    /// A bordered table
    Table,
}

/// Write rows to a UTF-8 CSV file with a header row.
pub fn write_csv(rows: &[PaperRow], path: &Path) -> Result<(), OutputError> {
    if rows.is_empty() {
        return Err(OutputError::EmptyInput);
    }

    let file = File::create(path)?;
    write_csv_to(rows, file)?;

    tracing::info!(count = rows.len(), path = %path.display(), "Wrote CSV");
    Ok(())
}

/// Write rows as CSV to any writer.
pub fn write_csv_to<W: Write>(rows: &[PaperRow], writer: W) -> Result<(), OutputError> {
    if rows.is_empty() {
        return Err(OutputError::EmptyInput);
    }

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Print rows to stdout. An empty slice prints nothing.
pub fn print_rows(rows: &[PaperRow], format: ConsoleFormat) -> Result<(), OutputError> {
    let stdout = io::stdout();
    render_rows(rows, format, &mut stdout.lock())
}

/// Render rows for the console into any writer.
pub fn render_rows<W: Write>(
    rows: &[PaperRow],
    format: ConsoleFormat,
    out: &mut W,
) -> Result<(), OutputError> {
    if rows.is_empty() {
        return Ok(());
    }

    match format {
        ConsoleFormat::Plain => {
            for row in rows {
                writeln!(out, "{}", row)?;
            }
        }
        ConsoleFormat::Json => {
            for row in rows {
                writeln!(out, "{}", serde_json::to_string(row)?)?;
            }
        }
        ConsoleFormat::Table => {
            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL);
            table.set_header(PaperRow::HEADERS.to_vec());
            for row in rows {
                table.add_row(row.values().to_vec());
            }
            writeln!(out, "{table}")?;
        }
    }

    Ok(())
}

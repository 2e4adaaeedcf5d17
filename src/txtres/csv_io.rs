//! CSV collaborator: writes projected tables, reads edited ones back.
//!
//! The binary codec never touches CSV specifics; this module is the only
//! place the `csv` crate appears, and the import path goes through the same
//! `ColumnMap` discovery the in-memory round trip uses.

use std::path::{Path, PathBuf};

use log::info;

use super::config::FormatConfig;
use super::error::Result;
use super::table::{ColumnMap, ImportRow, Table};

/// Write a projected table (either view) as CSV with a header row.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

/// Read an edited editing-view CSV back into import rows.
///
/// The column layout is discovered from the file's header row, so a table
/// exported with any variant span reads back without configuration.
pub fn read_rows(path: &Path) -> Result<Vec<ImportRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let map = ColumnMap::discover(&columns)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        rows.push(map.row(&cells));
    }

    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// `<input filename><export suffix>`, next to the input.
pub fn export_path(input: &Path, config: &FormatConfig) -> PathBuf {
    append_suffix(input, config.export_suffix)
}

/// `<input filename><analysis suffix>`, next to the input.
pub fn analysis_path(input: &Path, config: &FormatConfig) -> PathBuf {
    append_suffix(input, config.analysis_suffix)
}

/// `<stem><converted suffix>.<ext>`: the suffix goes before the extension
/// so the re-encoded file keeps the asset extension the game expects.
pub fn converted_path(input: &Path, config: &FormatConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, config.converted_suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, config.converted_suffix),
    };
    input.with_file_name(name)
}

fn append_suffix(input: &Path, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", name, suffix))
}

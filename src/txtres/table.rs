//! Tabular projections of a document, and the row model for imports.
//!
//! Two views exist. The editing view is the primary export/import surface:
//! one row per record plus two synthetic rows carrying the header and
//! footer blobs as hex text, so the opaque byte ranges round-trip through
//! the same tabular medium as the records. The analysis view denormalizes
//! translations by variant type across the whole document and is
//! export-only.

use std::collections::HashMap;

use log::debug;

use super::config::FormatConfig;
use super::error::{Result, TxtResError};
use super::models::Document;
use super::text;

/// A projected table: column names plus rows of cells, one cell per column.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Project a document into the editing view.
///
/// Columns: `key`, `original`, empty edit columns `translation1..N`, then
/// per variant slot `i` in `1..=max_variants`: `variant{i}_type` (marker
/// prefix + hex tag, empty when the record has fewer variants),
/// `variant{i}_original` (decoded text) and an empty `variant{i}_translation`
/// edit column. The column span is driven by the record with the most
/// variants.
pub fn export_table(document: &Document, config: &FormatConfig) -> Table {
    let max_variants = document.max_variants();

    let mut columns = vec!["key".to_string(), "original".to_string()];
    for n in 1..=config.edit_columns {
        columns.push(format!("translation{}", n));
    }
    for i in 1..=max_variants {
        columns.push(format!("variant{}_type", i));
        columns.push(format!("variant{}_original", i));
        columns.push(format!("variant{}_translation", i));
    }
    let width = columns.len();

    let mut rows = Vec::with_capacity(document.records.len() + 2);
    rows.push(sentinel_row(config.header_key, &document.header, width));
    rows.push(sentinel_row(config.footer_key, &document.footer, width));

    for record in &document.records {
        let mut row = Vec::with_capacity(width);
        row.push(record.key.clone());
        row.push(record.translation.text.clone());
        for _ in 0..config.edit_columns {
            row.push(String::new());
        }
        for i in 0..max_variants {
            match record.variants.get(i) {
                Some(variant) => {
                    row.push(format!("{}{}", config.variant_marker, variant.type_tag));
                    row.push(variant.translation.text.clone());
                    row.push(String::new());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        rows.push(row);
    }

    debug!(
        "Projected {} rows across {} columns ({} variant slots)",
        rows.len(),
        width,
        max_variants
    );

    Table { columns, rows }
}

fn sentinel_row(key: &str, blob: &[u8], width: usize) -> Vec<String> {
    let mut row = Vec::with_capacity(width);
    row.push(key.to_string());
    row.push(hex::encode(blob));
    row.resize(width, String::new());
    row
}

/// Project a document into the variants analysis view.
///
/// One column per distinct variant type marker, in first-seen order across
/// the whole document (a single discovery pass runs before emission). One
/// row per distinct key that carries at least one variant, first-seen
/// order; cells hold that key's translation for the type with interior NUL
/// bytes rendered as `<nul>`, blank where the key has no variant of that
/// type.
pub fn variants_table(document: &Document, config: &FormatConfig) -> Table {
    let mut markers: Vec<String> = Vec::new();
    let mut marker_cols: HashMap<String, usize> = HashMap::new();
    for record in &document.records {
        for variant in &record.variants {
            let marker = format!("{}{}", config.variant_marker, variant.type_tag);
            if !marker_cols.contains_key(&marker) {
                // Columns 0 and 1 are key and original.
                marker_cols.insert(marker.clone(), 2 + markers.len());
                markers.push(marker);
            }
        }
    }

    let mut columns = vec!["key".to_string(), "original".to_string()];
    columns.extend(markers.iter().cloned());
    let width = columns.len();

    let mut row_of_key: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in &document.records {
        if record.variants.is_empty() {
            continue;
        }
        let row_idx = match row_of_key.get(&record.key) {
            Some(&idx) => idx,
            None => {
                let mut row = Vec::with_capacity(width);
                row.push(record.key.clone());
                row.push(record.translation.text.clone());
                row.resize(width, String::new());
                rows.push(row);
                row_of_key.insert(record.key.clone(), rows.len() - 1);
                rows.len() - 1
            }
        };
        for variant in &record.variants {
            let marker = format!("{}{}", config.variant_marker, variant.type_tag);
            if let Some(&col) = marker_cols.get(&marker) {
                rows[row_idx][col] = text::render_nuls(&variant.translation.text);
            }
        }
    }

    debug!(
        "Analysis view: {} keys across {} variant types",
        rows.len(),
        markers.len()
    );

    Table { columns, rows }
}

/// One imported row in column-name-addressable form.
#[derive(Debug, Clone, Default)]
pub struct ImportRow {
    pub key: String,
    pub original: String,
    /// Candidate edit columns `translation1..N`, in index order.
    pub translations: Vec<String>,
    /// Variant slots in column order.
    pub variants: Vec<ImportVariantSlot>,
}

/// The three cells of one `variant{i}_*` column group.
#[derive(Debug, Clone, Default)]
pub struct ImportVariantSlot {
    /// Type tag cell, still carrying the marker prefix; empty means the
    /// slot holds no variant.
    pub type_tag: String,
    /// The originally decoded translation for this slot.
    pub original: String,
    /// The edited translation, empty when untouched.
    pub translation: String,
}

/// Column positions of an editing-view table, discovered from its header
/// row. The variant span adapts to however many slots the table was
/// exported with.
#[derive(Debug)]
pub struct ColumnMap {
    key: usize,
    original: usize,
    translations: Vec<usize>,
    variants: Vec<VariantCols>,
}

#[derive(Debug)]
struct VariantCols {
    type_col: usize,
    original_col: Option<usize>,
    translation_col: Option<usize>,
}

impl ColumnMap {
    /// Discover column positions from header names. `key` and `original`
    /// are required; `translationN` and `variant{i}_*` groups are collected
    /// while consecutively present.
    pub fn discover(columns: &[String]) -> Result<Self> {
        let position = |name: &str| columns.iter().position(|c| c == name);

        let key = position("key").ok_or_else(|| TxtResError::MissingColumn("key".to_string()))?;
        let original = position("original")
            .ok_or_else(|| TxtResError::MissingColumn("original".to_string()))?;

        let mut translations = Vec::new();
        for n in 1.. {
            match position(&format!("translation{}", n)) {
                Some(idx) => translations.push(idx),
                None => break,
            }
        }

        let mut variants = Vec::new();
        for i in 1.. {
            match position(&format!("variant{}_type", i)) {
                Some(type_col) => variants.push(VariantCols {
                    type_col,
                    original_col: position(&format!("variant{}_original", i)),
                    translation_col: position(&format!("variant{}_translation", i)),
                }),
                None => break,
            }
        }

        Ok(ColumnMap {
            key,
            original,
            translations,
            variants,
        })
    }

    /// Assemble one row's cells into an `ImportRow`. Cells past the end of
    /// a short row read as empty.
    pub fn row(&self, cells: &[String]) -> ImportRow {
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        ImportRow {
            key: cell(self.key),
            original: cell(self.original),
            translations: self.translations.iter().map(|&idx| cell(idx)).collect(),
            variants: self
                .variants
                .iter()
                .map(|cols| ImportVariantSlot {
                    type_tag: cell(cols.type_col),
                    original: cols.original_col.map(&cell).unwrap_or_default(),
                    translation: cols.translation_col.map(&cell).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// An imported table separated into its sentinel blobs and content rows.
#[derive(Debug)]
pub struct ImportSet {
    /// Header blob as hex text, from the reserved header row.
    pub header_hex: String,
    /// Footer blob as hex text, from the reserved footer row.
    pub footer_hex: String,
    pub rows: Vec<ImportRow>,
}

/// Pop the reserved header/footer rows out of an imported row list.
///
/// Both sentinel rows must be present; their blobs live in the `original`
/// column as hex text.
pub fn split_sentinels(rows: Vec<ImportRow>, config: &FormatConfig) -> Result<ImportSet> {
    let mut header_hex = None;
    let mut footer_hex = None;
    let mut content = Vec::with_capacity(rows.len());

    for row in rows {
        if row.key == config.header_key {
            header_hex = Some(row.original);
        } else if row.key == config.footer_key {
            footer_hex = Some(row.original);
        } else {
            content.push(row);
        }
    }

    Ok(ImportSet {
        header_hex: header_hex.ok_or(TxtResError::MissingSentinelRow("header"))?,
        footer_hex: footer_hex.ok_or(TxtResError::MissingSentinelRow("footer"))?,
        rows: content,
    })
}

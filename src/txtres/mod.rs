//! Core text-resource codec module

pub mod config;
pub mod csv_io;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod length;
pub mod models;
pub mod policy;
pub mod table;
pub mod text;
mod utils;
pub mod validate;

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::info;

use self::config::FormatConfig;
pub use self::error::{Result, TxtResError};
use self::models::Document;
use self::table::Table;

/// A fully decoded text-resource file plus the configuration it was parsed
/// with.
///
/// The document is immutable once parsed; edits travel through the tabular
/// views and come back as a new byte stream via [`encoder::encode`], which
/// streams from rows without reconstructing a document.
pub struct TxtResFile {
    file_path: PathBuf,
    config: FormatConfig,
    pub document: Document,
}

impl TxtResFile {
    /// Open and fully decode a text-resource file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is smaller than the
    /// configured header, or fails mid-record with anything other than the
    /// expected end-of-records condition.
    pub fn open(path: impl AsRef<Path>, config: FormatConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening text resource: {}", path.display());
        let mut file = File::open(path)?;
        let file_size = file.seek(SeekFrom::End(0))?;
        let document = decoder::parse(&mut file, file_size, &config)?;
        Ok(Self {
            file_path: path.to_path_buf(),
            config,
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// The main editing view: one row per record plus the header/footer
    /// sentinel rows.
    pub fn export_table(&self) -> Table {
        table::export_table(&self.document, &self.config)
    }

    /// The denormalized per-variant-type analysis view.
    pub fn variants_table(&self) -> Table {
        table::variants_table(&self.document, &self.config)
    }
}

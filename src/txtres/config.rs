//! Format constants exposed as an explicit configuration value.

/// Layout constants for the text-resource binary and its tabular views.
///
/// Passed into decode/encode/export calls rather than living as module
/// globals, so tests and variant game builds can use alternate layouts.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Fixed header size in bytes, copied verbatim ahead of the record stream.
    pub header_len: u64,
    /// Reserved key of the synthetic table row carrying the header blob.
    pub header_key: &'static str,
    /// Reserved key of the synthetic table row carrying the footer blob.
    pub footer_key: &'static str,
    /// Prefix on variant type tags in tabular form, keeping a hex tag from
    /// colliding with ordinary cell text.
    pub variant_marker: &'static str,
    /// Number of empty candidate columns (`translation1..N`) in the export
    /// table for the selection policy to reference.
    pub edit_columns: usize,
    /// Chunk size for the byte-for-byte output comparison.
    pub compare_chunk_len: usize,
    /// Appended to the input filename for the main editing CSV.
    pub export_suffix: &'static str,
    /// Appended to the input filename for the variants analysis CSV.
    pub analysis_suffix: &'static str,
    /// Inserted before the extension for the re-encoded binary.
    pub converted_suffix: &'static str,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            header_len: 17,
            header_key: "UT--HEADER",
            footer_key: "UT--FOOTER",
            variant_marker: "v-",
            edit_columns: 5,
            compare_chunk_len: 8,
            export_suffix: "-output.csv",
            analysis_suffix: "-variants-analysis.csv",
            converted_suffix: "-converted",
        }
    }
}

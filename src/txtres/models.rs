//! Data structures representing text-resource format components

/// Storage encoding of a translation payload, resolved from its length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// One byte per character, 7-bit ASCII (high bytes pass through as
    /// Latin-1).
    Ascii,
    /// UTF-16 little-endian, two bytes per code unit.
    Utf16Le,
}

/// A decoded translation: human-form text plus the encoding it was stored in.
///
/// Human form means the trailing NUL is stripped and every CRLF pair is
/// replaced by the `<crlf>` marker, so the text survives a plain-text
/// tabular round trip. The recorded encoding is decode provenance; the
/// encoder re-derives the output encoding from content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub encoding: TextEncoding,
}

/// An alternate translation attached to a record, tagged by an 8-byte type
/// code. The tag is kept as a 16-character hex string and round-trips
/// verbatim.
#[derive(Debug, Clone)]
pub struct Variant {
    pub type_tag: String,
    pub translation: Translation,
}

/// One key + translation + variants unit of the record stream.
#[derive(Debug, Clone)]
pub struct Record {
    /// ASCII lookup key, NUL terminator stripped.
    pub key: String,
    pub translation: Translation,
    pub variants: Vec<Variant>,
}

/// A fully decoded text-resource file.
///
/// Header and footer are opaque byte ranges outside the record stream,
/// preserved verbatim. Re-encoding an unedited document reproduces the
/// original file bit for bit.
#[derive(Debug, Clone)]
pub struct Document {
    pub header: Vec<u8>,
    pub records: Vec<Record>,
    pub footer: Vec<u8>,
}

impl Document {
    /// Largest variant count across all records; drives the tabular column
    /// span.
    pub fn max_variants(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.variants.len())
            .max()
            .unwrap_or(0)
    }
}

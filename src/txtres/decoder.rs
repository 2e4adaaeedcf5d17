//! Record stream decoder: header, record loop, footer capture.

use std::io::{Read, Seek};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, info, trace};

use super::config::FormatConfig;
use super::error::{Result, TxtResError};
use super::length::{self, LengthField};
use super::models::{Document, Record, TextEncoding, Translation, Variant};
use super::text;
use super::utils;

/// Parse a whole text-resource stream of `file_size` bytes.
///
/// Layout:
/// - `config.header_len` bytes: opaque header, copied verbatim
/// - repeated records: key, translation, variant count, variants
/// - footer: everything from the last fully decoded record to end of file
///
/// The stream declares no record count, so the loop ends when any read
/// inside a record would extend past end of file; that read is the expected
/// termination and discovers the footer boundary. Any other read failure is
/// fatal. The decoder never backtracks: each decoded field's `next` offset
/// chains directly into the following field's start offset.
pub fn parse<R: Read + Seek>(
    file: &mut R,
    file_size: u64,
    config: &FormatConfig,
) -> Result<Document> {
    info!(
        "Parsing text resource: {} bytes, {}-byte header",
        file_size, config.header_len
    );

    let header = utils::read_at(file, 0, config.header_len, file_size).map_err(|e| {
        if e.is_end_of_records() {
            TxtResError::TruncatedOrCorrupt(format!(
                "file of {} bytes is smaller than the {}-byte header",
                file_size, config.header_len
            ))
        } else {
            e
        }
    })?;

    let mut next = header.next;
    let mut records = Vec::new();

    while next < file_size {
        match read_record(file, next, file_size) {
            Ok((record, after)) => {
                trace!(
                    "Record {:?} at offset {}: {} variants",
                    record.key,
                    next,
                    record.variants.len()
                );
                records.push(record);
                next = after;
            }
            Err(e) if e.is_end_of_records() => {
                debug!("Record loop ended at offset {}: {}", next, e);
                break;
            }
            Err(e) => return Err(e),
        }
    }

    // Everything after the last fully decoded record is footer, copied
    // verbatim rather than parsed.
    let footer = utils::read_at(file, next, file_size - next, file_size)?;

    info!(
        "Parsed {} records, footer spans {} bytes",
        records.len(),
        footer.bytes.len()
    );

    Ok(Document {
        header: header.bytes,
        records,
        footer: footer.bytes,
    })
}

/// Decode one record starting at `offset`.
///
/// Record layout:
/// - 4 bytes: key length, then the ASCII key
/// - 4 bytes: translation length (sentinel-aware), then the payload
/// - 4 bytes: variant count
/// - per variant: 8-byte type tag, then one translation block
///
/// Returns the record and the offset of the next one.
fn read_record<R: Read + Seek>(
    file: &mut R,
    offset: u64,
    file_size: u64,
) -> Result<(Record, u64)> {
    let key_len = read_length(file, offset, file_size)?;
    let key_block = utils::read_at(file, key_len.next, key_len.field.byte_len, file_size)?;
    let key = text::decode(&key_block.bytes, TextEncoding::Ascii).text;

    let (translation, after_translation) = read_translation(file, key_block.next, file_size)?;

    let count_block = utils::read_at(file, after_translation, 4, file_size)?;
    let variant_count = LittleEndian::read_u32(&count_block.bytes);

    let mut next = count_block.next;
    let mut variants = Vec::new();
    for _ in 0..variant_count {
        let (variant, after) = read_variant(file, next, file_size)?;
        variants.push(variant);
        next = after;
    }

    Ok((
        Record {
            key,
            translation,
            variants,
        },
        next,
    ))
}

/// One variant: 8-byte opaque type tag plus its translation block.
fn read_variant<R: Read + Seek>(
    file: &mut R,
    offset: u64,
    file_size: u64,
) -> Result<(Variant, u64)> {
    let tag = utils::read_at(file, offset, 8, file_size)?;
    let (translation, next) = read_translation(file, tag.next, file_size)?;
    Ok((
        Variant {
            type_tag: hex::encode(&tag.bytes),
            translation,
        },
        next,
    ))
}

/// A length field and the resolved payload behind it.
fn read_translation<R: Read + Seek>(
    file: &mut R,
    offset: u64,
    file_size: u64,
) -> Result<(Translation, u64)> {
    let len = read_length(file, offset, file_size)?;
    let payload = utils::read_at(file, len.next, len.field.byte_len, file_size)?;
    let encoding = if len.field.is_unicode {
        TextEncoding::Utf16Le
    } else {
        TextEncoding::Ascii
    };
    Ok((text::decode(&payload.bytes, encoding), payload.next))
}

struct LengthAt {
    field: LengthField,
    next: u64,
}

fn read_length<R: Read + Seek>(file: &mut R, offset: u64, file_size: u64) -> Result<LengthAt> {
    let block = utils::read_at(file, offset, 4, file_size)?;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&block.bytes);
    Ok(LengthAt {
        field: length::decode(raw),
        next: block.next,
    })
}

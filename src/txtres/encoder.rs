//! Record stream encoder: edited rows back to the binary layout.
//!
//! The encoder streams straight from imported rows; it never reconstructs a
//! typed document. Header and footer come verbatim from the sentinel rows'
//! hex text, every length prefix is recomputed (including the UTF-16
//! sentinel form), and the output is `header ++ records ++ footer` as one
//! byte vector.

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, info};

use super::config::FormatConfig;
use super::error::{Result, TxtResError};
use super::policy::SelectionPolicy;
use super::table::{ImportRow, ImportSet};
use super::text;

/// Encode an imported table into the binary record format.
///
/// For each content row the output translation is chosen by the selection
/// policy; each variant's translation is its edit cell when non-empty, else
/// the originally decoded text. With no edits and the `"1"` policy this
/// reproduces the decoded file bit for bit.
pub fn encode(
    set: &ImportSet,
    policy: &SelectionPolicy,
    config: &FormatConfig,
) -> Result<Vec<u8>> {
    let header = hex::decode(&set.header_hex).map_err(|source| TxtResError::InvalidHex {
        context: "header row",
        source,
    })?;
    let footer = hex::decode(&set.footer_hex).map_err(|source| TxtResError::InvalidHex {
        context: "footer row",
        source,
    })?;

    info!(
        "Encoding {} rows (header {} bytes, footer {} bytes, policy {:?})",
        set.rows.len(),
        header.len(),
        footer.len(),
        policy.columns()
    );

    let mut out = Vec::new();
    out.extend_from_slice(&header);
    for row in &set.rows {
        encode_row(&mut out, row, policy, config)?;
    }
    out.extend_from_slice(&footer);

    debug!("Encoded byte stream: {} bytes", out.len());
    Ok(out)
}

fn encode_row(
    out: &mut Vec<u8>,
    row: &ImportRow,
    policy: &SelectionPolicy,
    config: &FormatConfig,
) -> Result<()> {
    // Key, unconditionally ASCII.
    let (key_bytes, key_field) = text::encode_key(&row.key);
    out.extend_from_slice(&key_field);
    out.extend_from_slice(&key_bytes);

    // Primary translation, chosen by policy, encoding re-derived from
    // content.
    let chosen = policy.choose(&row.original, &row.translations);
    let (payload, field) = text::encode(chosen);
    out.extend_from_slice(&field);
    out.extend_from_slice(&payload);

    // Variant count is encoded explicitly, then the kept slots in column
    // order.
    let variants = collect_variants(row, config)?;
    out.write_u32::<LittleEndian>(variants.len() as u32)?;
    for (tag, translation) in variants {
        out.extend_from_slice(&tag);
        let (payload, field) = text::encode(translation);
        out.extend_from_slice(&field);
        out.extend_from_slice(&payload);
    }

    Ok(())
}

/// Re-derive a row's variant list from its `variant{i}_*` slots.
///
/// A slot is kept only when its type cell is non-empty after the marker
/// prefix is stripped. Kept slots must form a contiguous prefix: a
/// populated slot after an empty one is a half-deleted variant and is
/// rejected rather than guessed at.
fn collect_variants<'a>(
    row: &'a ImportRow,
    config: &FormatConfig,
) -> Result<Vec<([u8; 8], &'a str)>> {
    let mut variants = Vec::new();
    let mut seen_empty = false;

    for (i, slot) in row.variants.iter().enumerate() {
        let tag_hex = slot
            .type_tag
            .strip_prefix(config.variant_marker)
            .unwrap_or(&slot.type_tag);

        if tag_hex.is_empty() {
            seen_empty = true;
            continue;
        }
        if seen_empty {
            return Err(TxtResError::VariantGap {
                key: row.key.clone(),
                slot: i + 1,
            });
        }

        let raw = hex::decode(tag_hex).map_err(|source| TxtResError::InvalidHex {
            context: "variant type tag",
            source,
        })?;
        let tag: [u8; 8] = raw.as_slice().try_into().map_err(|_| TxtResError::BadVariantTag {
            key: row.key.clone(),
            got: raw.len(),
        })?;

        let translation = if slot.translation.is_empty() {
            slot.original.as_str()
        } else {
            slot.translation.as_str()
        };
        variants.push((tag, translation));
    }

    Ok(variants)
}

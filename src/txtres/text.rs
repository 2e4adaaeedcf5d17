//! Translation text codec: encoding selection and NUL/CRLF normalization.
//!
//! Decoded text is kept in "human form": the trailing NUL terminator is
//! stripped and CRLF pairs become the `<crlf>` marker, so the text survives
//! editing in a plain-text tabular medium. Encoding is the exact inverse,
//! with the output encoding chosen by 7-bit ASCII purity of the content.

use encoding_rs::UTF_16LE;

use super::length;
use super::models::{TextEncoding, Translation};

/// Marker standing in for a CRLF pair in human-form text.
pub const CRLF_TOKEN: &str = "<crlf>";

/// Marker standing in for a NUL byte in the variants analysis view.
pub const NUL_TOKEN: &str = "<nul>";

/// Decode payload bytes into a human-form translation.
///
/// ASCII payloads map byte-for-byte onto the first 256 code points;
/// UTF-16LE payloads go through encoding_rs.
pub fn decode(payload: &[u8], encoding: TextEncoding) -> Translation {
    let raw = match encoding {
        TextEncoding::Ascii => payload.iter().map(|&b| b as char).collect::<String>(),
        TextEncoding::Utf16Le => UTF_16LE.decode(payload).0.into_owned(),
    };
    Translation {
        text: to_human(&raw),
        encoding,
    }
}

/// Strip exactly one trailing NUL and replace every CRLF pair with the
/// marker token.
pub fn to_human(raw: &str) -> String {
    let stripped = raw.strip_suffix('\u{0}').unwrap_or(raw);
    stripped.replace("\r\n", CRLF_TOKEN)
}

/// Encode human-form text back to payload bytes plus its 4-byte length
/// field.
///
/// The marker is restored to CRLF and, when the text is non-empty, one
/// encoding-appropriate NUL terminator is appended before the length is
/// computed. Empty text encodes as a zero-length ASCII field with no
/// terminator, which keeps it distinguishable from a NUL-only string.
/// Pure 7-bit ASCII text takes the ASCII form; anything else takes
/// UTF-16LE with the sentinel length.
pub fn encode(human: &str) -> (Vec<u8>, [u8; 4]) {
    let restored = human.replace(CRLF_TOKEN, "\r\n");
    if human.is_ascii() {
        let mut bytes = restored.into_bytes();
        if !bytes.is_empty() {
            bytes.push(0);
        }
        let field = length::encode_ascii(bytes.len() as u32);
        (bytes, field)
    } else {
        let mut bytes: Vec<u8> = restored
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect();
        bytes.extend_from_slice(&[0, 0]);
        let field = length::encode_unicode(bytes.len() as u32);
        (bytes, field)
    }
}

/// Encode a record key. Keys are 7-bit ASCII by construction and always
/// take the ASCII form regardless of content.
pub fn encode_key(key: &str) -> (Vec<u8>, [u8; 4]) {
    let restored = key.replace(CRLF_TOKEN, "\r\n");
    let mut bytes = restored.into_bytes();
    if !bytes.is_empty() {
        bytes.push(0);
    }
    let field = length::encode_ascii(bytes.len() as u32);
    (bytes, field)
}

/// Render interior NUL bytes as the `<nul>` token. Analysis view only;
/// never re-imported.
pub fn render_nuls(text: &str) -> String {
    text.replace('\u{0}', NUL_TOKEN)
}

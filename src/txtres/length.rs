//! 4-byte length field codec, including the UTF-16 sentinel form.

use byteorder::{ByteOrder, LittleEndian};

/// Raw values above this boundary are UTF-16 sentinels, never literal ASCII
/// byte counts. Real records are far smaller than 2 GiB, so the sign bit
/// (when the field is reinterpreted as signed 32-bit) is the entire
/// ASCII/UTF-16 discriminator; the format carries no separate flag byte.
const UNICODE_SENTINEL_FLOOR: u32 = 0x7FFF_FFFF;

/// A decoded 4-byte little-endian length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthField {
    /// The stored value, as read.
    pub raw: u32,
    /// Whether the payload is UTF-16LE rather than ASCII.
    pub is_unicode: bool,
    /// Resolved payload length in bytes.
    pub byte_len: u64,
}

/// Decode a length field.
///
/// A sentinel value stores `0xFFFF_FFFF - code_units + 1`, so the payload
/// byte length is the inversion doubled:
/// `byte_len = (0xFFFF_FFFF - raw + 1) * 2`.
pub fn decode(raw_bytes: [u8; 4]) -> LengthField {
    let raw = LittleEndian::read_u32(&raw_bytes);
    if raw > UNICODE_SENTINEL_FLOOR {
        LengthField {
            raw,
            is_unicode: true,
            byte_len: (0xFFFF_FFFFu64 - raw as u64 + 1) * 2,
        }
    } else {
        LengthField {
            raw,
            is_unicode: false,
            byte_len: raw as u64,
        }
    }
}

/// Length field for an ASCII payload of `byte_len` bytes.
pub fn encode_ascii(byte_len: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, byte_len);
    buf
}

/// Sentinel length field for a UTF-16LE payload of `byte_len` bytes
/// (`byte_len` must be even; the stored value counts code units).
pub fn encode_unicode(byte_len: u32) -> [u8; 4] {
    let code_units = byte_len / 2;
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, (0xFFFF_FFFF - code_units).wrapping_add(1));
    buf
}

//! Byte-for-byte comparison of a re-encoded file against its original.

use std::io::{Read, Seek, SeekFrom};

use log::{debug, warn};

use super::error::Result;

/// A divergence between two byte streams found during comparison.
///
/// Divergences are operator warnings, not errors: the comparison itself
/// always completes normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// The streams have different lengths. Non-fatal; chunk comparison
    /// still runs over the shorter stream's span.
    SizeMismatch { left: u64, right: u64 },
    /// The first chunk whose bytes differ. Comparison halts here rather
    /// than enumerating every later difference.
    ByteMismatch {
        offset: u64,
        left: Vec<u8>,
        right: Vec<u8>,
    },
}

/// Compare two streams in fixed-size chunks from offset 0 until the shorter
/// stream's end.
///
/// Each chunk buffer is zero-filled before reading, so a final partial
/// chunk compares against the other stream's real bytes and a truncated
/// tail shows up as a mismatch at the chunk boundary.
pub fn compare<A: Read + Seek, B: Read + Seek>(
    left: &mut A,
    right: &mut B,
    chunk_len: usize,
) -> Result<Vec<Divergence>> {
    let left_size = left.seek(SeekFrom::End(0))?;
    let right_size = right.seek(SeekFrom::End(0))?;

    let mut divergences = Vec::new();
    if left_size != right_size {
        warn!(
            "Size mismatch: {} bytes vs {} bytes",
            left_size, right_size
        );
        divergences.push(Divergence::SizeMismatch {
            left: left_size,
            right: right_size,
        });
    }

    left.seek(SeekFrom::Start(0))?;
    right.seek(SeekFrom::Start(0))?;

    let common = left_size.min(right_size);
    let mut left_chunk = vec![0u8; chunk_len];
    let mut right_chunk = vec![0u8; chunk_len];
    let mut offset = 0u64;

    while offset < common {
        read_padded(left, &mut left_chunk)?;
        read_padded(right, &mut right_chunk)?;
        if left_chunk != right_chunk {
            warn!("Byte mismatch in chunk at offset {}", offset);
            divergences.push(Divergence::ByteMismatch {
                offset,
                left: left_chunk.clone(),
                right: right_chunk.clone(),
            });
            break;
        }
        offset += chunk_len as u64;
    }

    debug!(
        "Compared {} bytes in {}-byte chunks: {} divergences",
        common,
        chunk_len,
        divergences.len()
    );
    Ok(divergences)
}

/// Fill `buf` from the stream, zero-padding past end of stream.
fn read_padded<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    buf.fill(0);
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

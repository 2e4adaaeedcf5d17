//! Low-level positional byte reading

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use super::error::{Result, TxtResError};

/// The result of one positional read: the bytes plus the offset of the
/// field that follows.
#[derive(Debug)]
pub struct Block {
    pub bytes: Vec<u8>,
    pub next: u64,
}

/// Read `len` bytes at `offset` from a seekable source of known size.
///
/// A read that would extend past `file_size` fails with `EndOfRecords`
/// before touching the file; the decoder turns that into the expected
/// record-loop termination. A short read inside the declared size is real
/// corruption and surfaces as `TruncatedOrCorrupt`.
pub fn read_at<R: Read + Seek>(
    file: &mut R,
    offset: u64,
    len: u64,
    file_size: u64,
) -> Result<Block> {
    match offset.checked_add(len) {
        Some(end) if end <= file_size => {}
        _ => {
            return Err(TxtResError::EndOfRecords {
                offset,
                requested: len,
                file_size,
            })
        }
    }

    let mut bytes = vec![0u8; len as usize];
    file.seek(SeekFrom::Start(offset))?;
    file.read_exact(&mut bytes).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            TxtResError::TruncatedOrCorrupt(format!(
                "short read of {} bytes at offset {}",
                len, offset
            ))
        } else {
            TxtResError::Io(e)
        }
    })?;

    Ok(Block {
        bytes,
        next: offset + len,
    })
}

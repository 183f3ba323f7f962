//! Backward block-scan tail reader
//!
//! Returns the last N lines of a file without reading the whole file into
//! memory: fixed-size blocks are read from the end toward the start until
//! enough line terminators have been seen. Memory use is bounded by the
//! blocks actually read rather than the file size, which is what matters
//! for large append-only honeypot event logs.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

use crate::access::{ReadAccess, SystemAccess};
use crate::error::FileError;

/// Default block size for backward scans, in bytes
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Mutable state of one backward scan
struct ScanCursor {
    /// Bytes consumed from the end of the file so far. Advances by one
    /// full block size per iteration, so it may pass the file length on
    /// the final partial block; the loop guard compares against length.
    consumed: u64,

    /// Line terminators still needed before the scan can stop
    lines_remaining: usize,

    /// Accumulated blocks, most recently read last. Each new block
    /// precedes all previously read ones in file order, so reversing
    /// the list reconstructs a contiguous suffix of the file.
    blocks: Vec<Vec<u8>>,
}

/// Returns the last `n` lines of the file at `path`, in original order,
/// with line terminators stripped.
///
/// Fewer than `n` lines are returned only when the whole file holds fewer
/// than `n` lines. An empty file yields an empty vector, not an error.
///
/// # Panics
///
/// Panics if `n` is zero; that is a caller-contract violation, not a
/// runtime condition.
pub fn tail(path: &Path, n: usize) -> Result<Vec<String>, FileError> {
    tail_with_block_size(path, n, DEFAULT_BLOCK_SIZE)
}

/// Like [`tail`], with an explicit scan block size.
///
/// # Panics
///
/// Panics if `n` or `block_size` is zero.
pub fn tail_with_block_size(
    path: &Path,
    n: usize,
    block_size: usize,
) -> Result<Vec<String>, FileError> {
    tail_with_gate(path, n, block_size, &SystemAccess)
}

/// Like [`tail_with_block_size`], with a caller-supplied permission gate.
///
/// The gate is consulted before the file is opened; a denial returns
/// [`FileError::AccessDenied`] without touching the file.
pub fn tail_with_gate(
    path: &Path,
    n: usize,
    block_size: usize,
    gate: &dyn ReadAccess,
) -> Result<Vec<String>, FileError> {
    assert!(n >= 1, "requested line count must be at least 1");
    assert!(block_size >= 1, "block size must be at least 1");

    if !gate.can_read(path) {
        return Err(FileError::denied(path));
    }

    let mut file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let len = file.seek(SeekFrom::End(0)).map_err(|e| FileError::io(path, e))?;
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut cursor = ScanCursor {
        consumed: 0,
        lines_remaining: n,
        blocks: Vec::new(),
    };
    // Scratch buffer reused across iterations
    let mut buf = vec![0u8; block_size];

    while cursor.lines_remaining > 0 && cursor.consumed < len {
        let remaining = len - cursor.consumed;
        let (start, read_len) = if remaining > block_size as u64 {
            (remaining - block_size as u64, block_size)
        } else {
            // Unread prefix is at most one block; this iteration
            // consumes it entirely and is necessarily the last.
            (0, remaining as usize)
        };

        file.seek(SeekFrom::Start(start))
            .map_err(|e| FileError::io(path, e))?;
        let chunk = &mut buf[..read_len];
        file.read_exact(chunk).map_err(|e| FileError::io(path, e))?;

        let found = chunk.iter().filter(|&&b| b == b'\n').count();
        cursor.lines_remaining = cursor.lines_remaining.saturating_sub(found);
        cursor.blocks.push(chunk.to_vec());
        cursor.consumed += block_size as u64;
    }

    debug!(
        "tail scan of {}: {} block(s) of {} bytes for {} line(s)",
        path.display(),
        cursor.blocks.len(),
        block_size,
        n
    );

    // Reverse into file order and reassemble the contiguous suffix
    let mut suffix = Vec::with_capacity(cursor.blocks.iter().map(Vec::len).sum());
    for block in cursor.blocks.iter().rev() {
        suffix.extend_from_slice(block);
    }

    let mut lines = split_lines(&suffix);
    let skip = lines.len().saturating_sub(n);
    Ok(lines.split_off(skip))
}

/// Splits on `\n` with terminators stripped. A final unterminated
/// fragment counts as a line; a trailing terminator does not produce an
/// empty last element.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            lines.push(String::from_utf8_lossy(&bytes[start..i]).into_owned());
            start = i + 1;
        }
    }
    if start < bytes.len() {
        lines.push(String::from_utf8_lossy(&bytes[start..]).into_owned());
    }
    lines
}

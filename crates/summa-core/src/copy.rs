//! Entry content copy with read/write failure separation.
//!
//! When an entry copy fails, the unpacker must know which side failed: a
//! failed read means the archive is corrupt (bad CRC, truncated stream),
//! a failed write is a filesystem error. `std::io::copy` folds both into a
//! single `io::Error`, so this module keeps its own loop.

use std::io;
use std::io::Read;
use std::io::Write;

/// Buffer size for entry copies (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable copy buffer, allocated once per unpack run.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of a copy failed.
#[derive(Debug)]
pub enum CopyError {
    /// Reading the source failed.
    Read(io::Error),
    /// Writing the destination failed.
    Write(io::Error),
}

/// Copies `reader` into `writer`, calling `on_chunk` after each write.
///
/// Returns the number of bytes copied.
///
/// # Examples
///
/// ```
/// use summa_core::copy::CopyBuffer;
/// use summa_core::copy::copy_entry;
///
/// let mut buffer = CopyBuffer::new();
/// let mut out = Vec::new();
/// let n = copy_entry(&mut &b"meta"[..], &mut out, &mut buffer, |_| {}).unwrap();
/// assert_eq!(n, 4);
/// assert_eq!(out, b"meta");
/// ```
pub fn copy_entry<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    mut on_chunk: F,
) -> Result<u64, CopyError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    F: FnMut(u64),
{
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;

        let chunk = bytes_read as u64;
        total = total.saturating_add(chunk);
        on_chunk(chunk);
    }

    Ok(total)
}

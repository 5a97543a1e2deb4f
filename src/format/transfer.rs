//! Raw byte transfer helpers
//!
//! Like `read_exact`/`write_all`, but they report how many bytes actually
//! moved instead of failing, so callers can surface short transfers.

use std::io::{self, ErrorKind, Read, Write};

/// Read until `buf` is full or the reader is exhausted; returns bytes read
pub(crate) fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Write until `buf` is consumed or the writer accepts nothing; returns bytes written
pub(crate) fn write_fully<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

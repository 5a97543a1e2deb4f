//! Section container capability
//!
//! The operation set every section container exposes. `SectionStore` is the
//! file-backed implementation.

use std::path::Path;

use crate::error::{Result, StoreError};
use crate::format::MAX_PAYLOAD_LEN;

/// Which path `save_section` took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new header was appended at end of file
    Appended,
    /// A section with the same name and size exists; the cursor is on its payload
    Existing,
}

/// Operations on a container of named, variably sized sections
///
/// ## Cursor contract
///
/// All operations share one cursor. `find_section` scans from wherever the
/// cursor currently is, NOT from the start of the file: a section that lies
/// before the cursor is invisible to it. Use `find_section_from_start`, or
/// `load_section`/`save_section` (which rewind first), for a full search.
pub trait SectionContainer {
    /// Open the container, creating it if missing. If already open, only
    /// rewinds the cursor to the start.
    fn open(&mut self) -> Result<()>;

    /// Release the handle. Safe to call when not open.
    fn close(&mut self);

    /// Whether the handle is currently open
    fn is_open(&self) -> bool;

    /// Whether the container exists. Never creates it and never leaves it open.
    fn exists(&self) -> bool;

    /// Move the cursor to the start of the container
    fn rewind(&mut self) -> Result<()>;

    /// Scan forward from the current cursor for `name`.
    ///
    /// Returns the declared payload length with the cursor on the first
    /// payload byte, or `None` with the cursor at end of file.
    fn find_section(&mut self, name: &str) -> Result<Option<u16>>;

    /// Scan the whole container for `name`
    fn find_section_from_start(&mut self, name: &str) -> Result<Option<u16>> {
        self.rewind()?;
        self.find_section(name)
    }

    /// Position for writing a payload of `declared_size` bytes under `name`.
    ///
    /// Reuses the first section named `name` only if its declared size equals
    /// `declared_size`; otherwise appends a fresh header at end of file. No
    /// payload bytes are written either way.
    fn save_section(&mut self, name: &str, declared_size: u16) -> Result<SaveOutcome>;

    /// Rewind and look up `name`; cursor on payload start when found
    fn load_section(&mut self, name: &str) -> Result<Option<u16>>;

    /// Read exactly `buf.len()` bytes at the cursor
    fn read_payload(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write exactly `buf.len()` bytes at the cursor
    fn write_payload(&mut self, buf: &[u8]) -> Result<()>;

    /// Close and remove the backing file
    fn delete_container(&mut self) -> Result<()>;

    /// Close and rebind to `new_path`. No data is moved.
    fn rename(&mut self, new_path: &Path);

    /// Close and reopen the handle so written bytes reach the OS
    fn hard_flush(&mut self) -> Result<()>;

    /// Write `bytes` at the cursor
    fn copy_to(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_payload(bytes)
    }

    /// Read `len` bytes at the cursor
    fn copy_from(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_payload(&mut buf)?;
        Ok(buf)
    }

    /// Store a whole section: header (if needed) then payload
    fn save(&mut self, name: &str, payload: &[u8]) -> Result<SaveOutcome> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(StoreError::PayloadTooLarge(payload.len()));
        }
        let outcome = self.save_section(name, payload.len() as u16)?;
        self.write_payload(payload)?;
        Ok(outcome)
    }

    /// Read a whole section, `None` if absent
    fn load(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.load_section(name)? {
            Some(len) => Ok(Some(self.copy_from(len as usize)?)),
            None => Ok(None),
        }
    }
}

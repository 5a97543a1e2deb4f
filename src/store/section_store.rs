//! File-backed section store
//!
//! Owns one `File` for its whole lifetime. The handle is opened lazily and
//! released on `close`, `delete_container`, `rename`, or drop.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::config::{SaveMode, StoreConfig};
use crate::error::{Result, StoreError};
use crate::format::{
    encode_name, read_fully, read_header, write_fully, HeaderRead, SectionHeader,
};

use super::container::{SaveOutcome, SectionContainer};

/// A container file of named sections
///
/// ## Concurrency
///
/// None. One store owns one handle and is meant for one thread. Wrap it in a
/// `SharedSectionStore` to share it.
pub struct SectionStore {
    /// Store configuration (path, save rule, flush behaviour)
    config: StoreConfig,

    /// Open handle, `None` while closed
    file: Option<File>,
}

impl SectionStore {
    /// Create a store for the configured path. No I/O happens until first use.
    pub fn new(config: StoreConfig) -> Self {
        Self { config, file: None }
    }

    /// Store with default config bound to `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::for_path(path))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current cursor offset
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.file_mut()?.stream_position()?)
    }

    /// Current length of the backing file
    pub fn len(&mut self) -> Result<u64> {
        Ok(self.file_mut()?.metadata()?.len())
    }

    /// Whether the backing file holds no bytes
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub(super) fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(StoreError::NotOpen)
    }

    /// Open a fresh handle without touching `self.file`
    fn open_handle(&self) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(self.config.create_if_missing)
            .open(&self.config.path)
            .map_err(|source| {
                warn!(
                    path = %self.config.path.display(),
                    error = %source,
                    "failed to open container"
                );
                StoreError::OpenFailed {
                    path: self.config.path.clone(),
                    source,
                }
            })
    }

    /// Open if closed; leave the cursor alone if already open
    fn ensure_open(&mut self) -> Result<()> {
        if self.file.is_none() {
            self.open()?;
        }
        Ok(())
    }
}

impl SectionContainer for SectionStore {
    fn open(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.rewind()?;
            return Ok(());
        }

        let file = self.open_handle()?;
        debug!(path = %self.config.path.display(), "opened container");
        self.file = Some(file);
        Ok(())
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            debug!(path = %self.config.path.display(), "closed container");
        }
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn exists(&self) -> bool {
        if self.file.is_some() {
            return true;
        }
        // Same access as `open`, minus create, so a missing file stays
        // missing and a directory does not count.
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.config.path)
            .is_ok()
    }

    fn rewind(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.file_mut()?.rewind()?;
        Ok(())
    }

    fn find_section(&mut self, name: &str) -> Result<Option<u16>> {
        let wanted = encode_name(name)?;
        self.ensure_open()?;
        let file = self.file_mut()?;

        loop {
            match read_header(&mut *file)? {
                HeaderRead::Header(header) => {
                    if header.name == wanted {
                        trace!(section = name, len = header.payload_len, "section found");
                        return Ok(Some(header.payload_len));
                    }
                    trace!(
                        section = %header.name_str(),
                        len = header.payload_len,
                        "skipping section"
                    );
                    file.seek(SeekFrom::Current(i64::from(header.payload_len)))?;
                }
                HeaderRead::End { .. } => {
                    // A skipped payload may point past EOF; settle on the real end.
                    file.seek(SeekFrom::End(0))?;
                    trace!(section = name, "section not found");
                    return Ok(None);
                }
            }
        }
    }

    fn save_section(&mut self, name: &str, declared_size: u16) -> Result<SaveOutcome> {
        let header = SectionHeader::new(name, declared_size)?;
        self.open()?;

        match self.find_section(name)? {
            Some(len) if len == declared_size => {
                debug!(section = name, len, "reusing existing section");
                Ok(SaveOutcome::Existing)
            }
            Some(len) if self.config.save_mode == SaveMode::Strict => {
                Err(StoreError::Inconsistent(format!(
                    "section {:?} exists with {} bytes, requested {}",
                    name, len, declared_size
                )))
            }
            found => {
                let file = self.file_mut()?;
                let offset = file.seek(SeekFrom::End(0))?;
                header.write_to(file)?;
                if let Some(len) = found {
                    warn!(
                        section = name,
                        old_len = len,
                        new_len = declared_size,
                        offset,
                        "appended duplicate section header; earlier header still wins lookups"
                    );
                } else {
                    debug!(section = name, len = declared_size, offset, "appended section header");
                }
                Ok(SaveOutcome::Appended)
            }
        }
    }

    fn load_section(&mut self, name: &str) -> Result<Option<u16>> {
        self.open()?;
        self.find_section(name)
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<()> {
        let file = self.file_mut()?;
        let read = read_fully(file, buf)?;
        if read < buf.len() {
            return Err(StoreError::ShortRead {
                expected: buf.len(),
                actual: read,
            });
        }
        Ok(())
    }

    fn write_payload(&mut self, buf: &[u8]) -> Result<()> {
        let file = self.file_mut()?;
        let written = write_fully(file, buf)?;
        if written < buf.len() {
            return Err(StoreError::ShortWrite {
                expected: buf.len(),
                actual: written,
            });
        }
        Ok(())
    }

    fn delete_container(&mut self) -> Result<()> {
        self.close();
        match fs::remove_file(&self.config.path) {
            Ok(()) => {
                debug!(path = %self.config.path.display(), "deleted container");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn rename(&mut self, new_path: &Path) {
        self.close();
        debug!(
            from = %self.config.path.display(),
            to = %new_path.display(),
            "rebinding container"
        );
        self.config.path = new_path.to_path_buf();
    }

    fn hard_flush(&mut self) -> Result<()> {
        // The handle is dropped (closed) at the end of this block even if
        // flushing fails.
        let position = match self.file.take() {
            Some(mut file) => {
                let position = file.stream_position()?;
                file.flush()?;
                if self.config.sync_on_hard_flush {
                    file.sync_all()?;
                }
                Some(position)
            }
            None => None,
        };

        let mut file = self.open_handle()?;
        if let Some(position) = position {
            file.seek(SeekFrom::Start(position))?;
        }
        self.file = Some(file);
        debug!(path = %self.config.path.display(), "hard flush complete");
        Ok(())
    }
}

impl Drop for SectionStore {
    fn drop(&mut self) {
        self.close();
    }
}

//! Configuration for a section store
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Configuration for one container file
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Path of the backing container file
    pub path: PathBuf,

    /// Create the file on open if it is missing
    pub create_if_missing: bool,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// How `save_section` treats an existing name with a different size
    pub save_mode: SaveMode,

    /// Call `sync_all` before closing the handle in `hard_flush`
    pub sync_on_hard_flush: bool,
}

/// Match rule used by `save_section`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Size-match rule: a header is reused only when the first section with the
    /// name has exactly the requested size. Any other case appends a new
    /// header at EOF. A same-named header with the old size stays first and
    /// keeps winning every forward scan from the start.
    #[default]
    Compatible,

    /// Reject a save whose name exists with a different size instead of
    /// appending an unreachable duplicate.
    Strict,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./sections.dat"),
            create_if_missing: true,
            save_mode: SaveMode::Compatible,
            sync_on_hard_flush: true,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Default config bound to `path`
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    path: Option<PathBuf>,
    create_if_missing: Option<bool>,
    save_mode: Option<SaveMode>,
    sync_on_hard_flush: Option<bool>,
}

impl StoreConfigBuilder {
    /// Set the container file path (required)
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Create the file on open if missing
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = Some(create);
        self
    }

    /// Set the save match rule
    pub fn save_mode(mut self, mode: SaveMode) -> Self {
        self.save_mode = Some(mode);
        self
    }

    /// Sync file contents to disk during `hard_flush`
    pub fn sync_on_hard_flush(mut self, sync: bool) -> Self {
        self.sync_on_hard_flush = Some(sync);
        self
    }

    pub fn build(self) -> Result<StoreConfig> {
        let path = self
            .path
            .ok_or_else(|| StoreError::Config("container path is required".to_string()))?;
        if path.as_os_str().is_empty() {
            return Err(StoreError::Config("container path is empty".to_string()));
        }

        let defaults = StoreConfig::default();
        Ok(StoreConfig {
            path,
            create_if_missing: self.create_if_missing.unwrap_or(defaults.create_if_missing),
            save_mode: self.save_mode.unwrap_or(defaults.save_mode),
            sync_on_hard_flush: self.sync_on_hard_flush.unwrap_or(defaults.sync_on_hard_flush),
        })
    }
}

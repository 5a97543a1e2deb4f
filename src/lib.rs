//! # sectionstore
//!
//! A named-section sequential file store:
//! - One flat binary file holds any number of named, variably sized sections
//! - Lookup is a linear scan from the cursor; the file is its own index
//! - New sections are appended; same-sized saves overwrite in place
//! - Headers and payloads are written by separate calls (no atomic framing)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Callers (instrument state save / load)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │   SectionContainer trait  (+ TypedSections, SharedStore)     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    SectionStore                              │
//! │        (one File, one cursor, lazy open, scan/verify)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────┐
//!               │    format    │
//!               │ header codec │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod format;
pub mod store;
pub mod typed;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{SaveMode, StoreConfig};
pub use error::{Result, StoreError};
pub use store::{
    SaveOutcome, SectionContainer, SectionInfo, SectionStore, SharedSectionStore, VerifyReport,
};
pub use typed::TypedSections;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sectionstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

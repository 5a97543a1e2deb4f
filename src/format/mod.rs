//! Container Format Module
//!
//! Binary framing of the section container.
//!
//! ## Responsibilities
//! - Encode and validate section names
//! - Write section headers
//! - Read section headers, telling a clean end of file apart from corruption
//!
//! ## File Format
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ Section 1                                             │
//! │ ┌───────────┬──────────────┬──────────┬─────────────┐ │
//! │ │NameLen (2)│Name + NUL    │PayLen (2)│Payload      │ │
//! │ └───────────┴──────────────┴──────────┴─────────────┘ │
//! ├───────────────────────────────────────────────────────┤
//! │ Section 2                                             │
//! │ ┌───────────┬──────────────┬──────────┬─────────────┐ │
//! │ │NameLen (2)│Name + NUL    │PayLen (2)│Payload      │ │
//! │ └───────────┴──────────────┴──────────┴─────────────┘ │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! No file header, no trailer, no index. All integers are little-endian.
//! `NameLen` counts the terminating NUL. `PayLen` is declared, never
//! enforced: the payload bytes are written by a separate call after the
//! header, so an interrupted write leaves a header whose payload is short.

mod header;
mod transfer;

pub use header::{encode_name, read_header, HeaderRead, SectionHeader};

pub(crate) use transfer::{read_fully, write_fully};

/// Size of each of the two length fields in a header
pub const LEN_FIELD_SIZE: u64 = 2;

/// Longest section name in bytes, excluding the NUL terminator
pub const MAX_NAME_LEN: usize = u16::MAX as usize - 1;

/// Largest declarable payload
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

//! Store Module
//!
//! The section container: one backing file, a shared cursor, and the
//! section-level operations built on top of them.
//!
//! ## Responsibilities
//! - Lazy open (create-if-missing) and explicit close of the backing file
//! - Cursor-relative section lookup by linear scan
//! - Header append for new sections, in-place positioning for existing ones
//! - Raw payload transfer at the cursor
//! - Whole-container scan for listing and verification
//!
//! ## Usage
//! ```text
//! save_section("calib", 4)  ->  cursor on payload start
//! write_payload(&[1, 2, 3, 4])
//! load_section("calib")     ->  Some(4), cursor on payload start
//! read_payload(&mut [0; 4])
//! ```

mod container;
mod scan;
mod section_store;
mod shared;

pub use container::{SaveOutcome, SectionContainer};
pub use scan::{SectionInfo, VerifyReport};
pub use section_store::SectionStore;
pub use shared::SharedSectionStore;

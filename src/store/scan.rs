//! Whole-container scan
//!
//! Walks every header from the start of the file without modifying it.
//! Used for listing sections and for spotting the damage an interrupted
//! payload write leaves behind.

use std::collections::HashSet;
use std::io::{Seek, SeekFrom};

use tracing::{debug, warn};

use crate::error::Result;
use crate::format::{read_fully, read_header, HeaderRead};

use super::container::SectionContainer;
use super::section_store::SectionStore;

/// One header found by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    /// Offset of the header's name-length field
    pub offset: u64,
    /// Offset of the first payload byte
    pub payload_offset: u64,
    /// Section name (lossy UTF-8, NUL stripped)
    pub name: String,
    /// Payload length declared in the header
    pub declared_len: u16,
    /// Payload bytes actually present before EOF (at most `declared_len`)
    pub available_len: u16,
    /// An earlier header has the same name, so lookups never reach this one
    pub shadowed: bool,
    /// CRC32 of the payload, only when the payload is complete
    pub crc32: Option<u32>,
}

impl SectionInfo {
    /// Whether every declared payload byte is present
    pub fn is_complete(&self) -> bool {
        self.available_len == self.declared_len
    }
}

/// Result of `SectionStore::verify`
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// Every header in file order
    pub sections: Vec<SectionInfo>,
    /// Bytes at the end of the file that do not form a complete header
    pub trailing_bytes: u64,
    /// Size of the container file
    pub file_len: u64,
}

impl VerifyReport {
    /// Sections whose payload runs past EOF
    pub fn truncated(&self) -> impl Iterator<Item = &SectionInfo> {
        self.sections.iter().filter(|s| !s.is_complete())
    }

    /// Headers hidden behind an earlier header of the same name
    pub fn shadowed(&self) -> impl Iterator<Item = &SectionInfo> {
        self.sections.iter().filter(|s| s.shadowed)
    }

    /// No truncated payloads and no partial trailing header
    pub fn is_clean(&self) -> bool {
        self.trailing_bytes == 0 && self.truncated().next().is_none()
    }
}

impl SectionStore {
    /// List every section header in file order
    ///
    /// Opens the container if needed and leaves the cursor at end of file.
    pub fn sections(&mut self) -> Result<Vec<SectionInfo>> {
        Ok(self.scan()?.0)
    }

    /// Scan the container and report truncation
    pub fn verify(&mut self) -> Result<VerifyReport> {
        let (sections, trailing_bytes, file_len) = self.scan()?;
        let report = VerifyReport {
            sections,
            trailing_bytes,
            file_len,
        };

        if report.is_clean() {
            debug!(sections = report.sections.len(), "container verified clean");
        } else {
            warn!(
                truncated = report.truncated().count(),
                trailing_bytes = report.trailing_bytes,
                "container has incomplete data"
            );
        }
        Ok(report)
    }

    fn scan(&mut self) -> Result<(Vec<SectionInfo>, u64, u64)> {
        self.open()?;
        let file = self.file_mut()?;
        let file_len = file.metadata()?.len();

        let mut seen = HashSet::new();
        let mut sections = Vec::new();
        let mut offset = 0u64;

        while let HeaderRead::Header(header) = read_header(&mut *file)? {
            let payload_offset = offset + header.encoded_len();
            let declared = u64::from(header.payload_len);
            let available = file_len.saturating_sub(payload_offset).min(declared);

            let crc32 = if available == declared {
                let mut payload = vec![0u8; header.payload_len as usize];
                read_fully(&mut *file, &mut payload)?;
                Some(crc32fast::hash(&payload))
            } else {
                None
            };

            sections.push(SectionInfo {
                offset,
                payload_offset,
                name: header.name_str(),
                declared_len: header.payload_len,
                available_len: available as u16,
                shadowed: !seen.insert(header.name),
                crc32,
            });

            offset = payload_offset + declared;
            file.seek(SeekFrom::Start(offset))?;
        }

        let trailing_bytes = file_len.saturating_sub(offset);
        file.seek(SeekFrom::End(0))?;
        Ok((sections, trailing_bytes, file_len))
    }
}

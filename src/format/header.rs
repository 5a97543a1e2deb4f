//! Section header codec
//!
//! Reads and writes the `[NameLen][Name NUL][PayLen]` frame that precedes
//! every payload.

use std::io::{Read, Write};

use tracing::warn;

use crate::error::{Result, StoreError};

use super::transfer::read_fully;
use super::{LEN_FIELD_SIZE, MAX_NAME_LEN};

/// Encode a section name as stored on disk: UTF-8 bytes plus a NUL terminator
pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    if name.is_empty() {
        return Err(StoreError::InvalidName("name is empty".to_string()));
    }
    if name.as_bytes().contains(&0) {
        return Err(StoreError::InvalidName(format!(
            "{:?} contains a NUL byte",
            name
        )));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(StoreError::InvalidName(format!(
            "name is {} bytes, max is {}",
            name.len(),
            MAX_NAME_LEN
        )));
    }

    let mut encoded = Vec::with_capacity(name.len() + 1);
    encoded.extend_from_slice(name.as_bytes());
    encoded.push(0);
    Ok(encoded)
}

/// A decoded section header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Raw name bytes as stored, including the NUL terminator
    pub name: Vec<u8>,
    /// Declared payload size
    pub payload_len: u16,
}

impl SectionHeader {
    /// Build a header for `name` declaring `payload_len` bytes
    pub fn new(name: &str, payload_len: u16) -> Result<Self> {
        Ok(Self {
            name: encode_name(name)?,
            payload_len,
        })
    }

    /// Bytes taken by this header on disk (payload not included)
    pub fn encoded_len(&self) -> u64 {
        LEN_FIELD_SIZE + self.name.len() as u64 + LEN_FIELD_SIZE
    }

    /// Name without the NUL terminator, lossily decoded
    pub fn name_str(&self) -> String {
        let raw = self.name.strip_suffix(&[0u8]).unwrap_or(&self.name);
        String::from_utf8_lossy(raw).into_owned()
    }

    /// Serialize to the on-disk layout
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len() as usize);
        buf.extend_from_slice(&(self.name.len() as u16).to_le_bytes());
        buf.extend_from_slice(&self.name);
        buf.extend_from_slice(&self.payload_len.to_le_bytes());
        buf
    }

    /// Write the header in a single call
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode())?;
        Ok(())
    }
}

/// Outcome of reading one header
#[derive(Debug, PartialEq, Eq)]
pub enum HeaderRead {
    /// A complete header; the reader is positioned on its first payload byte
    Header(SectionHeader),
    /// Fewer bytes than a full header remained. `consumed` bytes were read.
    End { consumed: u64 },
}

/// Read the next header from `reader`
///
/// A short read of any field means the container ends here. A name length of
/// zero read in full is corruption.
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<HeaderRead> {
    let mut len_buf = [0u8; 2];
    let n = read_fully(reader, &mut len_buf)?;
    if n < len_buf.len() {
        return Ok(HeaderRead::End { consumed: n as u64 });
    }

    let name_len = u16::from_le_bytes(len_buf) as usize;
    if name_len == 0 {
        warn!("section header with zero name length");
        return Err(StoreError::Inconsistent(
            "section header has a zero name length".to_string(),
        ));
    }

    let mut name = vec![0u8; name_len];
    let n = read_fully(reader, &mut name)?;
    if n < name_len {
        return Ok(HeaderRead::End {
            consumed: LEN_FIELD_SIZE + n as u64,
        });
    }

    let n = read_fully(reader, &mut len_buf)?;
    if n < len_buf.len() {
        return Ok(HeaderRead::End {
            consumed: LEN_FIELD_SIZE + name_len as u64 + n as u64,
        });
    }

    Ok(HeaderRead::Header(SectionHeader {
        name,
        payload_len: u16::from_le_bytes(len_buf),
    }))
}

//! Typed payloads
//!
//! Stores serde values as section payloads using bincode. The container
//! format does not change: a typed section is an ordinary section whose
//! payload happens to be a bincode encoding.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::store::{SaveOutcome, SectionContainer};

/// Extension methods for storing serde values in any section container
pub trait TypedSections: SectionContainer {
    /// Encode `value` and save it as section `name`
    ///
    /// Save rules are those of `save_section`: a value whose encoding changes
    /// size is appended as a new header under `SaveMode::Compatible`.
    fn save_value<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<SaveOutcome> {
        let payload =
            bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.save(name, &payload)
    }

    /// Load and decode section `name`, `None` if absent
    fn load_value<T: DeserializeOwned>(&mut self, name: &str) -> Result<Option<T>> {
        match self.load(name)? {
            Some(payload) => bincode::deserialize(&payload)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }
}

impl<C: SectionContainer + ?Sized> TypedSections for C {}

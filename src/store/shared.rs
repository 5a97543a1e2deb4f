//! Shared store handle
//!
//! A `SectionStore` has one cursor, so a lookup and the payload transfer that
//! follows it must not interleave with another caller. This handle runs each
//! closure under one lock.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;

use super::container::{SaveOutcome, SectionContainer};
use super::section_store::SectionStore;

/// Cloneable, thread-safe handle to one `SectionStore`
#[derive(Clone)]
pub struct SharedSectionStore {
    inner: Arc<Mutex<SectionStore>>,
}

impl SharedSectionStore {
    /// Take ownership of `store` behind a shared lock
    pub fn new(store: SectionStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store
    pub fn with<R>(&self, f: impl FnOnce(&mut SectionStore) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    /// Store a whole section
    pub fn save(&self, name: &str, payload: &[u8]) -> Result<SaveOutcome> {
        self.with(|store| store.save(name, payload))
    }

    /// Read a whole section
    pub fn load(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.with(|store| store.load(name))
    }
}

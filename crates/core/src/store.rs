//! Key-value byte store seam used by the prompt archive.
//!
//! The archive only ever reads and writes whole values, so the trait is a
//! plain load/save pair. [`MemoryStore`] backs tests and ephemeral runs; the
//! file-backed implementation lives in the `nano-store` crate.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::CoreError;

/// Named slots of opaque bytes.
pub trait ByteStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Replace a slot's contents.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError>;
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

//! History and library of prompt snapshots.
//!
//! Both lists are stored newest-first as a JSON array of documents in a
//! [`ByteStore`] slot. History is capped at [`MAX_HISTORY`]; the library is
//! unbounded. Every mutation is a read-modify-write of the whole list, held
//! under the archive's write lock so concurrent callers never drop entries.
//! Unreadable slots are treated as empty and logged, never surfaced.

use std::sync::{Arc, Mutex};

use crate::error::CoreError;
use crate::prompt::PromptDocument;
use crate::store::ByteStore;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Store slot holding the generation history.
pub const HISTORY_KEY: &str = "nano_banana_history";

/// Store slot holding the saved library.
pub const LIBRARY_KEY: &str = "nano_banana_library";

/// Maximum number of history entries kept.
pub const MAX_HISTORY: usize = 10;

// ---------------------------------------------------------------------------
// Pure list operations
// ---------------------------------------------------------------------------

/// Prepend a snapshot, evicting the oldest entries beyond `cap`.
pub fn prepend_capped(
    list: &[PromptDocument],
    doc: &PromptDocument,
    cap: Option<usize>,
) -> Vec<PromptDocument> {
    let mut next = Vec::with_capacity(list.len() + 1);
    next.push(doc.clone());
    next.extend(list.iter().cloned());
    if let Some(cap) = cap {
        next.truncate(cap);
    }
    next
}

/// Remove the entry at `index`, keeping the others in order.
pub fn remove_at(
    list: &[PromptDocument],
    index: usize,
    entity: &'static str,
) -> Result<Vec<PromptDocument>, CoreError> {
    if index >= list.len() {
        return Err(CoreError::NotFound { entity, index });
    }
    Ok(list
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, doc)| doc.clone())
        .collect())
}

// ---------------------------------------------------------------------------
// PromptArchive
// ---------------------------------------------------------------------------

/// History and library persisted in a [`ByteStore`].
///
/// Clones share the store and the write lock.
#[derive(Clone)]
pub struct PromptArchive {
    store: Arc<dyn ByteStore>,
    writes: Arc<Mutex<()>>,
}

impl PromptArchive {
    pub fn new(store: Arc<dyn ByteStore>) -> Self {
        Self {
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Current history, newest first.
    pub fn history(&self) -> Vec<PromptDocument> {
        self.load_list(HISTORY_KEY)
    }

    /// Current library, newest first.
    pub fn library(&self) -> Vec<PromptDocument> {
        self.load_list(LIBRARY_KEY)
    }

    pub fn history_entry(&self, index: usize) -> Result<PromptDocument, CoreError> {
        self.history()
            .into_iter()
            .nth(index)
            .ok_or(CoreError::NotFound {
                entity: "History entry",
                index,
            })
    }

    pub fn library_entry(&self, index: usize) -> Result<PromptDocument, CoreError> {
        self.library()
            .into_iter()
            .nth(index)
            .ok_or(CoreError::NotFound {
                entity: "Library entry",
                index,
            })
    }

    /// Record a snapshot at the head of the history.
    pub fn record_history(&self, doc: &PromptDocument) -> Result<Vec<PromptDocument>, CoreError> {
        let next = self.update_list(HISTORY_KEY, |list| {
            Ok(prepend_capped(&list, doc, Some(MAX_HISTORY)))
        })?;
        tracing::info!(entries = next.len(), "Recorded prompt in history");
        Ok(next)
    }

    /// Save a snapshot at the head of the library.
    pub fn save_to_library(&self, doc: &PromptDocument) -> Result<Vec<PromptDocument>, CoreError> {
        let next = self.update_list(LIBRARY_KEY, |list| Ok(prepend_capped(&list, doc, None)))?;
        tracing::info!(entries = next.len(), "Saved prompt to library");
        Ok(next)
    }

    /// Remove a library entry by position.
    pub fn remove_from_library(&self, index: usize) -> Result<Vec<PromptDocument>, CoreError> {
        let next = self.update_list(LIBRARY_KEY, |list| remove_at(&list, index, "Library entry"))?;
        tracing::info!(index, entries = next.len(), "Removed prompt from library");
        Ok(next)
    }

    /// Load, transform and save one list as a single critical section.
    fn update_list<F>(&self, key: &str, change: F) -> Result<Vec<PromptDocument>, CoreError>
    where
        F: FnOnce(Vec<PromptDocument>) -> Result<Vec<PromptDocument>, CoreError>,
    {
        let _guard = self
            .writes
            .lock()
            .map_err(|_| CoreError::Internal("archive write lock poisoned".into()))?;
        let next = change(self.load_list(key))?;
        self.save_list(key, &next)?;
        Ok(next)
    }

    fn load_list(&self, key: &str) -> Vec<PromptDocument> {
        let bytes = match self.store.load(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read prompt list; using empty list");
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<PromptDocument>>(&bytes) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to parse prompt list; using empty list");
                Vec::new()
            }
        }
    }

    fn save_list(&self, key: &str, list: &[PromptDocument]) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(list)
            .map_err(|e| CoreError::Internal(format!("JSON encode failed: {e}")))?;
        self.store.save(key, &bytes)
    }
}

impl std::fmt::Debug for PromptArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptArchive").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

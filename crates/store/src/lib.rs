//! File-backed [`ByteStore`] for prompt history and library.
//!
//! Each slot is one file, `<root>/<key>.json`. Saves write a uniquely named
//! sibling temp file and rename it over the target so a reader never sees a
//! partial list and two writers never share a temp file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use nano_core::store::ByteStore;
use nano_core::CoreError;

/// Extension appended to every slot file.
const SLOT_EXTENSION: &str = "json";

/// Sequence for temp file names within this process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory of slot files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            CoreError::Storage(format!("Cannot create data dir {}: {e}", root.display()))
        })?;
        tracing::info!(root = %root.display(), "File store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, CoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{SLOT_EXTENSION}")))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!("{key}.{}.{seq}.tmp", std::process::id()))
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<(), CoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CoreError::Storage(format!("Invalid store key '{key}'")))
    }
}

impl ByteStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let path = self.slot_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Storage(format!(
                "Cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let path = self.slot_path(key)?;
        let tmp = self.tmp_path(key);
        fs::write(&tmp, bytes)
            .map_err(|e| CoreError::Storage(format!("Cannot write {}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(CoreError::Storage(format!(
                "Cannot replace {}: {e}",
                path.display()
            )));
        }
        tracing::debug!(key, bytes = bytes.len(), "Slot saved");
        Ok(())
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use super::PersistentStore;

/// One-file-per-key store rooted at a directory.
///
/// Keys map directly to file names (`<dir>/list_a`, `<dir>/nightMode`).
#[derive(Clone, Debug)]
pub struct FileStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// What: Map a key to its file path.
    ///
    /// Output:
    /// - `None` for keys that would escape the store directory or are empty.
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return None;
        }
        Some(self.dir.join(key))
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "[Store] Failed to read entry; treating as absent"
                );
                None
            }
        }
    }

    /// What: Persist `value` under `key`.
    ///
    /// Details:
    /// - Ensures the store directory exists before writing (first run on a device).
    /// - Writes to a sibling temp file and renames it so a crash never leaves a
    ///   truncated list behind.
    fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        let path = self.path_for(key).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid store key {key:?}"),
            )
        })?;
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(
            path = %path.display(),
            bytes = value.len(),
            "[Store] Entry persisted"
        );
        Ok(())
    }
}

//! Single-document JSON persistence
//!
//! A `DocStore<T>` owns one JSON file holding a top-level array of `T`.
//! Reads fail soft (a missing or corrupt document degrades to an empty
//! collection); writes replace the whole document atomically so a
//! concurrent reader never observes a partial collection.

use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Store for a single JSON document containing an array of records
pub struct DocStore<T> {
    path: PathBuf,
    lock_path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> DocStore<T> {
    /// Open a store at the given document path, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create store directory")?;
        }
        let lock_path = path.with_extension("lock");
        debug!(?path, "Opened document store");
        Ok(Self {
            path,
            lock_path,
            _marker: PhantomData,
        })
    }

    /// Path of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection
    ///
    /// A missing document yields an empty collection. An unreadable or
    /// corrupt document is logged and also yields an empty collection;
    /// the on-disk file is left untouched.
    pub fn load(&self) -> Vec<T> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No document yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read document");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt document, treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize the collection and replace the document atomically
    ///
    /// Writes to a temp file in the same directory, fsyncs, then renames
    /// over the document. An exclusive advisory lock on a sidecar file
    /// serializes writers across processes for the duration of the save.
    pub fn save(&self, records: &[T]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let lock_file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.lock_path)
            .context("Failed to open lock file")?;
        lock_file.lock_exclusive().context("Failed to acquire store lock")?;

        let json = serde_json::to_vec_pretty(records).context("Failed to serialize collection")?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).context("Failed to create temp file")?;
        tmp.write_all(&json).context("Failed to write collection")?;
        tmp.as_file().sync_all().context("Failed to sync collection")?;
        tmp.persist(&self.path)
            .context("Failed to replace document")?;

        debug!(path = %self.path.display(), count = records.len(), "Saved collection");

        // Lock released when lock_file drops
        Ok(())
    }
}

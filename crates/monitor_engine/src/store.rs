use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use monitor_core::Snapshot;
use monitor_logging::{monitor_info, monitor_warn};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot directory missing or not writable: {0}")]
    ParentDir(String),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// File-backed snapshot store: one JSON document mapping
/// `"<source>_<id>"` keys to stored entries.
///
/// Reads are fail-open, writes are atomic. The store is touched exactly
/// twice per run: one load at the start of reconciliation, one save at
/// the end.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the prior snapshot.
    ///
    /// A missing file is a normal first run. An unreadable or corrupt
    /// file is logged and treated as empty history, so one bad write
    /// can never block all future notifications; the cost is a one-time
    /// re-announcement of every current record as new.
    pub fn load(&self) -> Snapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Snapshot::new();
            }
            Err(err) => {
                monitor_warn!("failed to read snapshot {:?}: {}", self.path, err);
                return Snapshot::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                monitor_warn!(
                    "corrupt snapshot {:?}, treating history as empty: {}",
                    self.path,
                    err
                );
                Snapshot::new()
            }
        }
    }

    /// Persist the full snapshot, replacing the previous one.
    ///
    /// Creates missing parent directories, then writes a temp file and
    /// renames it over the target, so a failed write leaves the prior
    /// on-disk snapshot intact.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let dir = self.ensure_parent_dir()?;
        let content = serde_json::to_string_pretty(snapshot)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        monitor_info!(
            "snapshot saved to {:?} ({} entries)",
            self.path,
            snapshot.len()
        );
        Ok(())
    }

    /// Delete the persisted snapshot entirely. Operator and test utility;
    /// deleting an absent snapshot is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                monitor_info!("snapshot cleared: {:?}", self.path);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn ensure_parent_dir(&self) -> Result<PathBuf, StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if dir.exists() {
            let meta = fs::metadata(dir).map_err(|e| StoreError::ParentDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(StoreError::ParentDir("path is not a directory".into()));
            }
        } else {
            fs::create_dir_all(dir).map_err(|e| StoreError::ParentDir(e.to_string()))?;
        }
        Ok(dir.to_path_buf())
    }
}

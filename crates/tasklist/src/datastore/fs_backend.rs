use super::backend::{BackendLock, Snapshot, StorageBackend};
use crate::error::{StoreError, StoreResult};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use uuid::Uuid;

pub const DATA_FILE: &str = "datastore.json";
pub const LOCK_FILE: &str = "datastore.lock";

/// Keeps the whole store in a single JSON document under `root`.
///
/// Every handle on the same `root`, in this process or another, takes an
/// exclusive lock on `datastore.lock` for each load-modify-save cycle.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StoreError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> StoreResult<Snapshot> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(data_file).map_err(StoreError::Io)?;
        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(StoreError::Serialization)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        self.ensure_dir()?;

        let content =
            serde_json::to_string_pretty(snapshot).map_err(StoreError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".datastore-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(StoreError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(StoreError::Io(e));
        }

        Ok(())
    }

    fn lock(&self) -> StoreResult<BackendLock> {
        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.root.join(LOCK_FILE))
            .map_err(StoreError::Io)?;
        BackendLock::exclusive(file).map_err(StoreError::Io)
    }
}

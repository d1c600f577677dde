use crate::error::StoreResult;
use crate::model::{Entity, Key};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;

/// An entity as persisted, with the clock value of its last write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntity {
    pub entity: Entity,
    pub version: u64,
}

/// The whole persisted state of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Highest id handed out so far (ids are shared across kinds).
    #[serde(default)]
    pub last_id: i64,

    /// Bumped on every mutation; source of entity versions.
    #[serde(default)]
    pub clock: u64,

    #[serde(default)]
    pub entities: BTreeMap<String, BTreeMap<i64, StoredEntity>>,
}

impl Snapshot {
    pub fn allocate_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    pub fn get(&self, key: &Key) -> Option<&StoredEntity> {
        self.entities.get(&key.kind).and_then(|m| m.get(&key.id))
    }

    /// Version of the entity under `key`, or 0 if it does not exist.
    pub fn version_of(&self, key: &Key) -> u64 {
        self.get(key).map(|s| s.version).unwrap_or(0)
    }

    pub fn put(&mut self, entity: Entity) {
        self.clock += 1;
        let key = entity.key().clone();
        // Keep the allocator ahead of ids that were written without allocation.
        if key.id > self.last_id {
            self.last_id = key.id;
        }
        self.entities.entry(key.kind).or_default().insert(
            key.id,
            StoredEntity {
                entity,
                version: self.clock,
            },
        );
    }

    pub fn delete(&mut self, key: &Key) -> bool {
        let removed = self
            .entities
            .get_mut(&key.kind)
            .and_then(|m| m.remove(&key.id))
            .is_some();
        if removed {
            self.clock += 1;
        }
        removed
    }

    pub fn entities_of_kind<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities
            .get(kind)
            .into_iter()
            .flat_map(|m| m.values().map(|s| &s.entity))
    }
}

/// Held across one load-modify-save cycle. Dropping it releases the lock.
///
/// Backends private to one process hand out [`BackendLock::in_process`] and rely
/// on the store's own mutex. Backends other processes can see hold an exclusive
/// OS file lock.
#[derive(Debug)]
pub struct BackendLock {
    file: Option<File>,
}

impl BackendLock {
    pub fn in_process() -> Self {
        Self { file: None }
    }

    /// Blocks until `file` is exclusively locked.
    pub fn exclusive(file: File) -> std::io::Result<Self> {
        file.lock_exclusive()?;
        Ok(Self { file: Some(file) })
    }
}

impl Drop for BackendLock {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            let _ = FileExt::unlock(file);
        }
    }
}

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while EntityStore handles the "what" (ids, versions, transactions, queries).
pub trait StorageBackend: Send + Sync {
    /// Load the full snapshot. A store that was never written loads as empty.
    fn load(&self) -> StoreResult<Snapshot>;

    /// Replace the persisted snapshot.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, snapshot: &Snapshot) -> StoreResult<()>;

    /// Serialize against other handles on the same storage.
    fn lock(&self) -> StoreResult<BackendLock> {
        Ok(BackendLock::in_process())
    }
}

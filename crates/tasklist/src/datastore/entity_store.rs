use super::backend::{BackendLock, Snapshot, StorageBackend};
use super::query::{Query, QueryResults};
use super::transaction::{Mutation, Transaction};
use super::Datastore;
use crate::error::{StoreError, StoreResult};
use crate::model::{Entity, IncompleteKey, Key};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// The document-store client, implemented once over any [`StorageBackend`].
///
/// Every operation is a load-modify-save cycle on the backend, serialized by an
/// internal mutex plus the backend's own lock, which covers other handles on the
/// same storage. Holding both is what makes transaction validation and commit a
/// single atomic step.
pub struct EntityStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    lock: Mutex<()>,
    next_txn: AtomicU64,
}

impl<B: StorageBackend> EntityStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
            next_txn: AtomicU64::new(1),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn guard(&self) -> StoreResult<CycleGuard<'_>> {
        let local = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        let backend = self.backend.lock()?;
        Ok(CycleGuard {
            _backend: backend,
            _local: local,
        })
    }

    fn read<R>(&self, f: impl FnOnce(&Snapshot) -> StoreResult<R>) -> StoreResult<R> {
        let _guard = self.guard()?;
        let snapshot = self.backend.load()?;
        f(&snapshot)
    }

    /// Nothing is saved when `f` fails.
    fn write<R>(&self, f: impl FnOnce(&mut Snapshot) -> StoreResult<R>) -> StoreResult<R> {
        let _guard = self.guard()?;
        let mut snapshot = self.backend.load()?;
        let out = f(&mut snapshot)?;
        self.backend.save(&snapshot)?;
        Ok(out)
    }
}

/// The backend lock is released before the local mutex.
struct CycleGuard<'a> {
    _backend: BackendLock,
    _local: MutexGuard<'a, ()>,
}

fn check_key(key: &Key) -> StoreResult<()> {
    if key.kind.is_empty() {
        return Err(StoreError::InvalidKey("kind cannot be empty".to_string()));
    }
    if key.id <= 0 {
        return Err(StoreError::InvalidKey(format!(
            "{}: id must be positive",
            key
        )));
    }
    Ok(())
}

impl<B: StorageBackend> Datastore for EntityStore<B> {
    fn allocate_id(&self, key: &IncompleteKey) -> StoreResult<Key> {
        if key.kind.is_empty() {
            return Err(StoreError::InvalidKey("kind cannot be empty".to_string()));
        }
        let id = self.write(|snap| Ok(snap.allocate_id()))?;
        tracing::debug!(kind = %key.kind, id, "allocated id");
        Ok(Key {
            kind: key.kind.clone(),
            id,
        })
    }

    fn put(&self, entity: &Entity) -> StoreResult<()> {
        check_key(entity.key())?;
        self.write(|snap| {
            snap.put(entity.clone());
            Ok(())
        })?;
        tracing::debug!(key = %entity.key(), "put entity");
        Ok(())
    }

    fn get(&self, key: &Key) -> StoreResult<Option<Entity>> {
        check_key(key)?;
        self.read(|snap| Ok(snap.get(key).map(|s| s.entity.clone())))
    }

    fn run_query(&self, query: &Query) -> StoreResult<QueryResults> {
        let results = self.read(|snap| Ok(query.execute(snap.entities_of_kind(query.get_kind()))))?;
        tracing::debug!(kind = query.get_kind(), count = results.size_hint().0, "ran query");
        Ok(results)
    }

    fn delete(&self, key: &Key) -> StoreResult<()> {
        check_key(key)?;
        let removed = self.write(|snap| Ok(snap.delete(key)))?;
        tracing::debug!(%key, removed, "delete entity");
        Ok(())
    }

    fn begin_transaction(&self) -> StoreResult<Transaction> {
        let id = self.next_txn.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(txn = id, "begin transaction");
        Ok(Transaction::new(id))
    }

    fn get_in_transaction(
        &self,
        txn: &mut Transaction,
        key: &Key,
    ) -> StoreResult<Option<Entity>> {
        txn.ensure_active()?;
        check_key(key)?;
        let (entity, version) = self.read(|snap| {
            Ok((
                snap.get(key).map(|s| s.entity.clone()),
                snap.version_of(key),
            ))
        })?;
        txn.record_read(key.clone(), version);
        Ok(entity)
    }

    fn commit(&self, txn: &mut Transaction) -> StoreResult<()> {
        txn.ensure_active()?;
        for mutation in txn.mutations() {
            match mutation {
                Mutation::Put(entity) => check_key(entity.key())?,
                Mutation::Delete(key) => check_key(key)?,
            }
        }

        {
            let _guard = self.guard()?;
            let mut snap = self.backend.load()?;
            for (key, seen) in txn.reads() {
                if snap.version_of(key) != *seen {
                    return Err(StoreError::Conflict {
                        kind: key.kind.clone(),
                        id: key.id,
                    });
                }
            }
            // Read-only transactions validate but leave storage untouched.
            if !txn.mutations().is_empty() {
                for mutation in txn.mutations() {
                    match mutation {
                        Mutation::Put(entity) => snap.put(entity.clone()),
                        Mutation::Delete(key) => {
                            snap.delete(key);
                        }
                    }
                }
                self.backend.save(&snap)?;
            }
        }

        tracing::debug!(txn = txn.id(), "committed transaction");
        txn.mark_committed();
        Ok(())
    }

    fn rollback(&self, txn: &mut Transaction) -> StoreResult<()> {
        txn.ensure_active()?;
        txn.mark_rolled_back();
        tracing::debug!(txn = txn.id(), "rolled back transaction");
        Ok(())
    }
}

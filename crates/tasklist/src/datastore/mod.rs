//! # Storage Layer
//!
//! This module defines the document-store client the rest of the crate talks to.
//! The [`Datastore`] trait is the *only* seam between task logic and persistence:
//! the record store ([`crate::api::TaskListApi`]) receives a handle at construction
//! and never reaches for a global.
//!
//! ## Client Surface
//!
//! | Method | Semantics |
//! |--------|-----------|
//! | `allocate_id` | Reserve a fresh id for a kind. Ids are never reused. |
//! | `put` | Insert or overwrite an entity. |
//! | `get` | Fetch by key, `None` when absent. |
//! | `run_query` | All entities of a kind, optionally ordered and limited. |
//! | `delete` | Remove by key. Absent keys are not an error. |
//! | `begin_transaction` / `commit` / `rollback` | Optimistic transactions. |
//!
//! ## Optimistic Transactions
//!
//! Every stored entity carries a version stamped from a store-wide clock. A
//! [`Transaction`] remembers the version of each key it reads (0 for "absent") and
//! buffers its writes. At commit the store re-checks those versions under its lock:
//!
//! - all unchanged → buffered mutations are applied together, the transaction closes;
//! - any changed → [`StoreError::Conflict`](crate::error::StoreError::Conflict),
//!   nothing is applied and the transaction **stays active** so the caller can
//!   roll it back.
//!
//! This gives read-then-write atomicity per key without holding locks across calls.
//!
//! ## Query Semantics
//!
//! Ordering follows document-store rules: an `ORDER BY p` query only returns entities
//! where `p` is present *and indexed*. Ties break on key id, so results are
//! deterministic. [`QueryResults`] is a one-shot iterator.
//!
//! ## Implementations
//!
//! [`EntityStore`](entity_store::EntityStore) implements the client once, over a raw
//! [`StorageBackend`](backend::StorageBackend):
//!
//! - [`memory::InMemoryDatastore`]: for tests and throwaway sessions.
//! - [`fs::FileDatastore`]: one JSON document on disk, written atomically.
//!
//! ## Storage Layout (file backend)
//!
//! ```text
//! <data_dir>/
//! └── datastore.json   # { last_id, clock, entities: { kind: { id: {entity, version} } } }
//! ```

use crate::error::StoreResult;
use crate::model::{Entity, IncompleteKey, Key};

pub mod backend;
pub mod entity_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod query;
pub mod transaction;

pub use query::{OrderBy, Query, QueryResults};
pub use transaction::{Mutation, Transaction};

/// Abstract interface of the document-store client.
///
/// All methods take `&self`: implementations synchronize internally so a single
/// handle can serve concurrent HTTP requests.
pub trait Datastore: Send + Sync {
    /// Reserve a new id for the key's kind.
    fn allocate_id(&self, key: &IncompleteKey) -> StoreResult<Key>;

    /// Insert or overwrite an entity
    fn put(&self, entity: &Entity) -> StoreResult<()>;

    /// Get an entity by key
    fn get(&self, key: &Key) -> StoreResult<Option<Entity>>;

    /// Run a query over one kind
    fn run_query(&self, query: &Query) -> StoreResult<QueryResults>;

    /// Delete an entity; succeeds whether or not it existed
    fn delete(&self, key: &Key) -> StoreResult<()>;

    fn begin_transaction(&self) -> StoreResult<Transaction>;

    /// Read through a transaction, recording the version seen for conflict checks.
    fn get_in_transaction(&self, txn: &mut Transaction, key: &Key)
        -> StoreResult<Option<Entity>>;

    /// Validate reads and apply buffered mutations atomically.
    fn commit(&self, txn: &mut Transaction) -> StoreResult<()>;

    /// Discard buffered mutations and close the transaction.
    fn rollback(&self, txn: &mut Transaction) -> StoreResult<()>;
}

impl<D: Datastore + ?Sized> Datastore for Box<D> {
    fn allocate_id(&self, key: &IncompleteKey) -> StoreResult<Key> {
        (**self).allocate_id(key)
    }

    fn put(&self, entity: &Entity) -> StoreResult<()> {
        (**self).put(entity)
    }

    fn get(&self, key: &Key) -> StoreResult<Option<Entity>> {
        (**self).get(key)
    }

    fn run_query(&self, query: &Query) -> StoreResult<QueryResults> {
        (**self).run_query(query)
    }

    fn delete(&self, key: &Key) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn begin_transaction(&self) -> StoreResult<Transaction> {
        (**self).begin_transaction()
    }

    fn get_in_transaction(
        &self,
        txn: &mut Transaction,
        key: &Key,
    ) -> StoreResult<Option<Entity>> {
        (**self).get_in_transaction(txn, key)
    }

    fn commit(&self, txn: &mut Transaction) -> StoreResult<()> {
        (**self).commit(txn)
    }

    fn rollback(&self, txn: &mut Transaction) -> StoreResult<()> {
        (**self).rollback(txn)
    }
}

use crate::error::{StoreError, StoreResult};
use crate::model::{Entity, Key};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Put(Entity),
    Delete(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxnState {
    Active,
    Committed,
    RolledBack,
}

/// Client-side state of an optimistic transaction.
///
/// Reads go through [`Datastore::get_in_transaction`](super::Datastore::get_in_transaction),
/// writes are buffered here until [`Datastore::commit`](super::Datastore::commit).
#[derive(Debug)]
pub struct Transaction {
    id: u64,
    state: TxnState,
    reads: HashMap<Key, u64>,
    mutations: Vec<Mutation>,
}

impl Transaction {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: TxnState::Active,
            reads: HashMap::new(),
            mutations: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.state == TxnState::Active
    }

    pub fn ensure_active(&self) -> StoreResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(StoreError::TransactionClosed)
        }
    }

    pub fn put(&mut self, entity: Entity) -> StoreResult<()> {
        self.ensure_active()?;
        self.mutations.push(Mutation::Put(entity));
        Ok(())
    }

    pub fn delete(&mut self, key: Key) -> StoreResult<()> {
        self.ensure_active()?;
        self.mutations.push(Mutation::Delete(key));
        Ok(())
    }

    /// Remember the version seen for `key`. Only the first read counts: a later
    /// re-read must not hide a change that happened in between.
    pub fn record_read(&mut self, key: Key, version: u64) {
        self.reads.entry(key).or_insert(version);
    }

    pub fn reads(&self) -> impl Iterator<Item = (&Key, &u64)> {
        self.reads.iter()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn mark_committed(&mut self) {
        self.state = TxnState::Committed;
        self.mutations.clear();
    }

    pub fn mark_rolled_back(&mut self) {
        self.state = TxnState::RolledBack;
        self.mutations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyFactory;

    #[test]
    fn closed_transaction_rejects_writes() {
        let keys = KeyFactory::new("Person");
        let mut txn = Transaction::new(1);
        txn.mark_rolled_back();

        assert!(!txn.is_active());
        assert!(matches!(
            txn.delete(keys.new_key(1)),
            Err(StoreError::TransactionClosed)
        ));
    }

    #[test]
    fn first_read_version_wins() {
        let keys = KeyFactory::new("Person");
        let mut txn = Transaction::new(1);
        txn.record_read(keys.new_key(1), 3);
        txn.record_read(keys.new_key(1), 9);

        let reads: Vec<_> = txn.reads().collect();
        assert_eq!(reads, vec![(&keys.new_key(1), &3)]);
    }
}

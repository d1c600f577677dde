use crate::datastore::{Datastore, Transaction};
use crate::error::{Result, StoreResult};
use crate::model::{fields, Entity, Key, KeyFactory, Value};

/// Marks the task `id` as done. Returns whether the task existed.
///
/// The read and the write share one transaction, so a concurrent change to the
/// same task makes the commit fail instead of being overwritten. Any failure
/// rolls the transaction back before the error is returned.
pub fn run<D: Datastore + ?Sized>(store: &D, keys: &KeyFactory, id: i64) -> Result<bool> {
    let mut txn = store.begin_transaction()?;
    let outcome = mark_done(store, &mut txn, &keys.new_key(id));

    if txn.is_active() {
        match store.rollback(&mut txn) {
            Ok(()) => tracing::warn!(id, "mark-done transaction rolled back"),
            Err(e) => tracing::warn!(id, error = %e, "rollback failed"),
        }
    }

    let found = outcome?;
    if found {
        tracing::info!(id, "task marked done");
    } else {
        tracing::info!(id, "task not found");
    }
    Ok(found)
}

fn mark_done<D: Datastore + ?Sized>(
    store: &D,
    txn: &mut Transaction,
    key: &Key,
) -> StoreResult<bool> {
    let task = store.get_in_transaction(txn, key)?;
    if let Some(task) = &task {
        txn.put(
            Entity::builder_from(task)
                .set(fields::DONE, Value::from(true))
                .build(),
        )?;
    }
    store.commit(txn)?;
    Ok(task.is_some())
}

use crate::datastore::Datastore;
use crate::error::Result;
use crate::model::KeyFactory;

/// Deletes the task `id`. Deleting a task that does not exist is not an error.
pub fn run<D: Datastore + ?Sized>(store: &D, keys: &KeyFactory, id: i64) -> Result<()> {
    store.delete(&keys.new_key(id))?;
    tracing::info!(id, "task deleted (if it existed)");
    Ok(())
}

use crate::datastore::Datastore;
use crate::error::{CommandError, Result};
use crate::model::{fields, Entity, KeyFactory, Person, Property, Value};
use chrono::Utc;

pub fn run<D: Datastore + ?Sized>(store: &D, keys: &KeyFactory, name: &str) -> Result<Person> {
    if name.trim().is_empty() {
        return Err(CommandError::EmptyName.into());
    }

    let key = store.allocate_id(&keys.new_incomplete_key())?;
    let task = Entity::builder(key)
        .set(fields::NAME, Property::unindexed(name))
        .set(fields::CREATED, Value::from(Utc::now()))
        .build();
    store.put(&task)?;

    tracing::info!(id = task.key().id, name, "task added");
    Ok(Person::from(&task))
}

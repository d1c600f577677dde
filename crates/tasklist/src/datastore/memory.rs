use super::entity_store::EntityStore;
use super::mem_backend::MemBackend;

pub type InMemoryDatastore = EntityStore<MemBackend>;

impl Default for InMemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        EntityStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::datastore::Datastore;
    use crate::model::{fields, Entity, KeyFactory, Property, Value, DEFAULT_KIND};
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryDatastore,
        pub keys: KeyFactory,
        created: i64,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryDatastore::new(),
                keys: KeyFactory::new(DEFAULT_KIND),
                created: 0,
            }
        }

        /// Each inserted task is one second younger than the previous one, so
        /// creation order is unambiguous.
        fn insert(&mut self, name: &str, done: Option<bool>) -> i64 {
            self.created += 1;
            let key = self
                .store
                .allocate_id(&self.keys.new_incomplete_key())
                .unwrap();
            let mut builder = Entity::builder(key.clone())
                .set(fields::NAME, Property::unindexed(name))
                .set(
                    fields::CREATED,
                    Value::from(Utc::now() - Duration::hours(1) + Duration::seconds(self.created)),
                );
            if let Some(done) = done {
                builder = builder.set(fields::DONE, Value::from(done));
            }
            self.store.put(&builder.build()).unwrap();
            key.id
        }

        pub fn with_tasks(mut self, count: usize) -> Self {
            for i in 0..count {
                self.insert(&format!("Test Task {}", i + 1), None);
            }
            self
        }

        pub fn with_task(mut self, name: &str) -> Self {
            self.insert(name, None);
            self
        }

        pub fn with_done_task(mut self, name: &str) -> Self {
            self.insert(name, Some(true));
            self
        }
    }
}

//! # API Facade
//!
//! [`TaskListApi`] is the record store: the single entry point both front ends
//! (console dispatcher and REST controller) go through.
//!
//! It owns exactly two things:
//! - the injected [`Datastore`] handle, and
//! - a [`KeyFactory`] for the configured kind (`"Person"` unless overridden).
//!
//! No other state survives between calls, so one instance behind an `Arc` can
//! serve concurrent HTTP requests without locking of its own.
//!
//! ## Generic Over Datastore
//!
//! - Production: `TaskListApi<FileDatastore>` or `TaskListApi<Box<dyn Datastore>>`
//! - Testing: `TaskListApi<InMemoryDatastore>`

use crate::commands;
use crate::datastore::{Datastore, QueryResults};
use crate::error::Result;
use crate::format::format_tasks;
use crate::model::{Entity, KeyFactory, Person, DEFAULT_KIND};

pub struct TaskListApi<D: Datastore> {
    store: D,
    keys: KeyFactory,
}

impl<D: Datastore> TaskListApi<D> {
    pub fn new(store: D) -> Self {
        Self::with_kind(store, DEFAULT_KIND)
    }

    pub fn with_kind(store: D, kind: impl Into<String>) -> Self {
        Self {
            store,
            keys: KeyFactory::new(kind),
        }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn keys(&self) -> &KeyFactory {
        &self.keys
    }

    /// Adds a task and returns it with its allocated id.
    pub fn add(&self, name: &str) -> Result<Person> {
        commands::add::run(&self.store, &self.keys, name)
    }

    /// Returns `false` when no task has this id.
    pub fn mark_done(&self, id: i64) -> Result<bool> {
        commands::done::run(&self.store, &self.keys, id)
    }

    /// Tasks in creation order, as a one-shot iterator.
    pub fn list(&self) -> Result<QueryResults> {
        commands::list::run(&self.store, &self.keys)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        commands::delete::run(&self.store, &self.keys, id)
    }

    pub fn format_tasks<I>(&self, tasks: I) -> Vec<String>
    where
        I: IntoIterator<Item = Entity>,
    {
        format_tasks(tasks)
    }

    /// `list` followed by `format_tasks`.
    pub fn list_formatted(&self) -> Result<Vec<String>> {
        Ok(format_tasks(self.list()?))
    }
}

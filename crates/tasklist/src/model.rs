//! # Domain Model
//!
//! Two layers of types live here:
//!
//! - The **document vocabulary** spoken by the [`Datastore`](crate::datastore::Datastore)
//!   client: [`Key`], [`IncompleteKey`], [`KeyFactory`], [`Value`], [`Property`] and
//!   [`Entity`]. An entity is a keyed bag of named, typed properties; each property
//!   carries its own indexing flag.
//! - The **record view** used by the front ends: [`Person`], a typed projection of a
//!   task entity that also doubles as the JSON body of the REST controller.
//!
//! ## Task Entity Layout
//!
//! | Property | Type | Indexed | Notes |
//! |----------|------|---------|-------|
//! | `name` | string | no | Free text description |
//! | `created` | timestamp | yes | Set once by `add`, drives list ordering |
//! | `done` | boolean | yes | Absent until the task is marked done |
//!
//! `done` is monotonic: nothing in this crate ever writes `false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Property names of a task entity.
pub mod fields {
    pub const NAME: &str = "name";
    pub const DONE: &str = "done";
    pub const CREATED: &str = "created";
}

pub const DEFAULT_KIND: &str = "Person";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    pub kind: String,
    pub id: i64,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.id)
    }
}

/// A key whose id has not been allocated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteKey {
    pub kind: String,
}

/// Builds keys for a single kind, so callers never spell the kind twice.
#[derive(Debug, Clone)]
pub struct KeyFactory {
    kind: String,
}

impl KeyFactory {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn new_key(&self, id: i64) -> Key {
        Key {
            kind: self.kind.clone(),
            id,
        }
    }

    pub fn new_incomplete_key(&self) -> IncompleteKey {
        IncompleteKey {
            kind: self.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    String(String),
    Boolean(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub value: Value,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude_from_indexes: bool,
}

impl Property {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            exclude_from_indexes: false,
        }
    }

    /// Same value, but invisible to queries that filter or order on it.
    pub fn unindexed(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            exclude_from_indexes: true,
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.exclude_from_indexes
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Property::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    key: Key,
    #[serde(default)]
    properties: BTreeMap<String, Property>,
}

impl Entity {
    pub fn builder(key: Key) -> EntityBuilder {
        EntityBuilder {
            key,
            properties: BTreeMap::new(),
        }
    }

    /// Starts a builder pre-filled with an existing entity's key and properties.
    pub fn builder_from(entity: &Entity) -> EntityBuilder {
        EntityBuilder {
            key: entity.key.clone(),
            properties: entity.properties.clone(),
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name).map(|p| &p.value) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name).map(|p| &p.value) {
            Some(Value::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.get(name).map(|p| &p.value) {
            Some(Value::Timestamp(t)) => Some(*t),
            _ => None,
        }
    }
}

pub struct EntityBuilder {
    key: Key,
    properties: BTreeMap<String, Property>,
}

impl EntityBuilder {
    pub fn set(mut self, name: &str, property: impl Into<Property>) -> Self {
        self.properties.insert(name.to_string(), property.into());
        self
    }

    pub fn build(self) -> Entity {
        Entity {
            key: self.key,
            properties: self.properties,
        }
    }
}

/// Typed view of a task entity.
///
/// Also the request and response body of `POST /person/update`, which is why
/// `id` and `done` are optional: clients send only `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            done: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.unwrap_or(false)
    }
}

impl From<&Entity> for Person {
    fn from(entity: &Entity) -> Self {
        Self {
            id: Some(entity.key().id),
            name: entity.get_string(fields::NAME).unwrap_or_default().to_string(),
            done: entity.get_bool(fields::DONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entity {
        let keys = KeyFactory::new(DEFAULT_KIND);
        Entity::builder(keys.new_key(42))
            .set(fields::NAME, Property::unindexed("buy milk"))
            .set(fields::CREATED, Value::from(Utc::now()))
            .build()
    }

    #[test]
    fn key_factory_stamps_its_kind() {
        let keys = KeyFactory::new("Task");
        assert_eq!(keys.new_key(3).kind, "Task");
        assert_eq!(keys.new_incomplete_key().kind, "Task");
        assert_eq!(keys.new_key(3).to_string(), "Task(3)");
    }

    #[test]
    fn builder_from_keeps_existing_properties() {
        let original = sample();
        let updated = Entity::builder_from(&original)
            .set(fields::DONE, Value::from(true))
            .build();

        assert_eq!(updated.key(), original.key());
        assert_eq!(updated.get_string(fields::NAME), Some("buy milk"));
        assert_eq!(updated.get_bool(fields::DONE), Some(true));
        assert!(original.get(fields::DONE).is_none());
    }

    #[test]
    fn name_is_stored_unindexed() {
        let entity = sample();
        assert!(!entity.get(fields::NAME).unwrap().is_indexed());
        assert!(entity.get(fields::CREATED).unwrap().is_indexed());
    }

    #[test]
    fn typed_getters_reject_mismatched_types() {
        let entity = sample();
        assert_eq!(entity.get_bool(fields::NAME), None);
        assert_eq!(entity.get_string(fields::CREATED), None);
    }

    #[test]
    fn person_from_fresh_entity_has_no_done() {
        let person = Person::from(&sample());
        assert_eq!(person.id, Some(42));
        assert_eq!(person.name, "buy milk");
        assert_eq!(person.done, None);
        assert!(!person.is_done());
    }

    #[test]
    fn person_body_only_needs_name() {
        let person: Person = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(person, Person::new("Ada"));
        assert_eq!(serde_json::to_string(&person).unwrap(), r#"{"name":"Ada"}"#);
    }
}

use crate::model::{Entity, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBy {
    Asc(String),
    Desc(String),
}

impl OrderBy {
    pub fn asc(property: &str) -> Self {
        OrderBy::Asc(property.to_string())
    }

    pub fn desc(property: &str) -> Self {
        OrderBy::Desc(property.to_string())
    }

    pub fn property(&self) -> &str {
        match self {
            OrderBy::Asc(p) | OrderBy::Desc(p) => p,
        }
    }
}

/// A query over all entities of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    kind: String,
    order_by: Vec<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn get_kind(&self) -> &str {
        &self.kind
    }

    /// Applies ordering and limit to the entities of the query's kind.
    pub fn execute<'a>(&self, entities: impl Iterator<Item = &'a Entity>) -> QueryResults {
        let mut matched: Vec<Entity> = entities
            .filter(|e| {
                self.order_by
                    .iter()
                    .all(|o| e.get(o.property()).is_some_and(|p| p.is_indexed()))
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            for order in &self.order_by {
                let ordering = compare_property(a, b, order.property());
                let ordering = match order {
                    OrderBy::Asc(_) => ordering,
                    OrderBy::Desc(_) => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            a.key().id.cmp(&b.key().id)
        });

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        QueryResults {
            inner: matched.into_iter(),
        }
    }
}

fn compare_property(a: &Entity, b: &Entity, property: &str) -> Ordering {
    match (a.get(property), b.get(property)) {
        (Some(pa), Some(pb)) => compare_values(&pa.value, &pb.value),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Timestamp(x), Value::Timestamp(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Boolean(_) => 0,
        Value::Integer(_) => 1,
        Value::Timestamp(_) => 2,
        Value::String(_) => 3,
    }
}

/// One-shot iterator over query results.
///
/// Deliberately not `Clone`: like a server-side cursor, it can be walked once.
#[derive(Debug)]
pub struct QueryResults {
    inner: std::vec::IntoIter<Entity>,
}

impl Iterator for QueryResults {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

use crate::datastore::{Datastore, OrderBy, Query, QueryResults};
use crate::error::Result;
use crate::model::{fields, KeyFactory};

/// All tasks of the factory's kind, oldest first.
pub fn query(keys: &KeyFactory) -> Query {
    Query::kind(keys.kind()).order_by(OrderBy::asc(fields::CREATED))
}

pub fn run<D: Datastore + ?Sized>(store: &D, keys: &KeyFactory) -> Result<QueryResults> {
    Ok(store.run_query(&query(keys))?)
}

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// A record kept in one of the store's collections.
///
/// The store owns identity and creation time: it builds records from a
/// `Draft` via [`Entity::materialize`] and mutates them only through
/// [`Entity::apply`].
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Collection name, used as the file stem or table name.
    const COLLECTION: &'static str;

    /// Human label used in not-found messages.
    const LABEL: &'static str;

    type Draft: Send + 'static;
    type Changes: Send + 'static;

    fn materialize(id: Uuid, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn apply(&mut self, changes: Self::Changes);

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;
}

/// Orders records newest first. Records sharing a timestamp keep reverse
/// insertion order, given `records` in insertion order.
pub fn newest_first<E: Entity>(mut records: Vec<E>) -> Vec<E> {
    records.reverse();
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    records
}

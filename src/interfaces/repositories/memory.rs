use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    entities::entity::{newest_first, Entity},
    errors::StoreError,
    repositories::collection::Repository,
};

/// Process-local store. Records are kept in insertion order.
pub struct MemoryRepo<E: Entity> {
    records: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryRepo<E> {
    pub fn new() -> Self {
        MemoryRepo {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Entity> Default for MemoryRepo<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepo<E> {
    async fn check_connection(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, draft: E::Draft) -> Result<E, StoreError> {
        let record = E::materialize(Uuid::new_v4(), Utc::now(), draft);
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<E>, StoreError> {
        let records = self.records.read().clone();
        Ok(newest_first(records))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<E>, StoreError> {
        Ok(self.records.read().iter().find(|r| r.id() == *id).cloned())
    }

    async fn update_by_id(&self, id: &Uuid, changes: E::Changes) -> Result<Option<E>, StoreError> {
        let mut records = self.records.write();
        Ok(records.iter_mut().find(|r| r.id() == *id).map(|record| {
            record.apply(changes);
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError> {
        self.records.write().retain(|r| r.id() != *id);
        Ok(())
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::{entities::entity::Entity, errors::StoreError};

/// Keyed storage for one collection of entities.
///
/// Implementations assign `id` and `createdAt` on insert and return lists
/// newest first. `delete_by_id` succeeds whether or not the record exists.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn check_connection(&self) -> Result<(), StoreError>;
    async fn insert(&self, draft: E::Draft) -> Result<E, StoreError>;
    async fn list(&self) -> Result<Vec<E>, StoreError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<E>, StoreError>;
    async fn update_by_id(&self, id: &Uuid, changes: E::Changes) -> Result<Option<E>, StoreError>;
    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError>;
}

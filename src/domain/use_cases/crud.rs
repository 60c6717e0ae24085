use std::sync::Arc;

use crate::{
    entities::entity::Entity,
    errors::AppError,
    repositories::collection::Repository,
    utils::valid_uuid::valid_uuid,
};

/// Shared list/get/create/update/delete over one collection.
///
/// Absent ids are 404 for get and update, success for delete.
pub struct CrudHandler<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for CrudHandler<E> {
    fn clone(&self) -> Self {
        CrudHandler { repo: Arc::clone(&self.repo) }
    }
}

impl<E: Entity> CrudHandler<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        CrudHandler { repo }
    }

    pub fn repo(&self) -> &Arc<dyn Repository<E>> {
        &self.repo
    }

    pub async fn list(&self) -> Result<Vec<E>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<E, AppError> {
        let valid_id = valid_uuid(id)?;

        self.repo
            .find_by_id(&valid_id)
            .await?
            .ok_or_else(not_found::<E>)
    }

    pub async fn create(&self, draft: E::Draft) -> Result<E, AppError> {
        let record = self.repo.insert(draft).await?;
        tracing::info!(collection = E::COLLECTION, id = %record.id(), "Created record");
        Ok(record)
    }

    pub async fn update(&self, id: &str, changes: E::Changes) -> Result<E, AppError> {
        let valid_id = valid_uuid(id)?;

        let record = self.repo
            .update_by_id(&valid_id, changes)
            .await?
            .ok_or_else(not_found::<E>)?;
        tracing::info!(collection = E::COLLECTION, id = %valid_id, "Updated record");
        Ok(record)
    }

    /// Idempotent: an id that is absent, or could never have been issued,
    /// is already deleted.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let Ok(valid_id) = valid_uuid(id) else {
            tracing::debug!(collection = E::COLLECTION, id, "Delete of unknown id format ignored");
            return Ok(());
        };

        self.repo.delete_by_id(&valid_id).await?;
        tracing::info!(collection = E::COLLECTION, id = %valid_id, "Deleted record");
        Ok(())
    }
}

fn not_found<E: Entity>() -> AppError {
    AppError::NotFound(format!("{} not found", E::LABEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::eq};
    use uuid::Uuid;

    use crate::{
        entities::project::{Project, ProjectDraft, ProjectForm},
        errors::StoreError,
    };

    mock! {
        pub ProjectRepo {}

        #[async_trait]
        impl Repository<Project> for ProjectRepo {
            async fn check_connection(&self) -> Result<(), StoreError>;
            async fn insert(&self, draft: ProjectDraft) -> Result<Project, StoreError>;
            async fn list(&self) -> Result<Vec<Project>, StoreError>;
            async fn find_by_id(&self, id: &Uuid) -> Result<Option<Project>, StoreError>;
            async fn update_by_id(&self, id: &Uuid, changes: ProjectDraft) -> Result<Option<Project>, StoreError>;
            async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError>;
        }
    }

    fn handler(repo: MockProjectRepo) -> CrudHandler<Project> {
        CrudHandler::new(Arc::new(repo))
    }

    fn draft() -> ProjectDraft {
        ProjectForm { title: "t".into(), ..Default::default() }.into_draft()
    }

    #[actix_rt::test]
    async fn storage_failure_becomes_internal_error() {
        let mut repo = MockProjectRepo::new();
        repo.expect_list()
            .returning(|| Err(StoreError::Io(std::io::Error::other("read failed"))));

        let err = handler(repo).list().await.unwrap_err();

        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[actix_rt::test]
    async fn update_of_absent_id_is_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockProjectRepo::new();
        repo.expect_update_by_id()
            .with(eq(id), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(None));

        let err = handler(repo).update(&id.to_string(), draft()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(msg) if msg == "Project not found"));
    }

    #[actix_rt::test]
    async fn malformed_id_never_reaches_the_store() {
        let mut repo = MockProjectRepo::new();
        repo.expect_delete_by_id().never();
        repo.expect_find_by_id().never();

        let crud = handler(repo);

        assert!(crud.delete("1700000000000").await.is_ok());
        assert!(matches!(crud.get("../etc").await, Err(AppError::InvalidInput(_))));
    }

    #[actix_rt::test]
    async fn delete_succeeds_whatever_the_store_held() {
        let mut repo = MockProjectRepo::new();
        repo.expect_delete_by_id().times(1).returning(|_| Ok(()));

        assert!(handler(repo).delete(&Uuid::new_v4().to_string()).await.is_ok());
    }
}

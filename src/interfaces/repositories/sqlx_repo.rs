use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    entities::entity::Entity,
    errors::StoreError,
    repositories::collection::Repository,
};

/// Document store on PostgreSQL: each collection is a table of JSONB bodies
/// keyed by id. `seq` breaks ties between equal timestamps.
pub struct SqlxDocumentRepo<E: Entity> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> SqlxDocumentRepo<E> {
    pub fn new(pool: PgPool) -> Self {
        SqlxDocumentRepo {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Clone for SqlxDocumentRepo<E> {
    fn clone(&self) -> Self {
        SqlxDocumentRepo::new(self.pool.clone())
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[async_trait]
impl<E: Entity> Repository<E> for SqlxDocumentRepo<E> {
    async fn check_connection(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, draft: E::Draft) -> Result<E, StoreError> {
        let record = E::materialize(Uuid::new_v4(), Utc::now(), draft);

        let sql = format!(
            "INSERT INTO {} (id, created_at, body) VALUES ($1, $2, $3)",
            E::COLLECTION
        );
        sqlx::query(&sql)
            .bind(record.id())
            .bind(record.created_at())
            .bind(Json(&record))
            .execute(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<E>, StoreError> {
        let sql = format!(
            "SELECT body FROM {} ORDER BY created_at DESC, seq DESC",
            E::COLLECTION
        );
        let records = sqlx::query_scalar::<_, Json<E>>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|Json(record)| record)
            .collect();

        Ok(records)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<E>, StoreError> {
        let sql = format!("SELECT body FROM {} WHERE id = $1", E::COLLECTION);
        let record = sqlx::query_scalar::<_, Json<E>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(|Json(record)| record))
    }

    // Read-modify-write without a transaction: concurrent updates to the
    // same id are last-write-wins.
    async fn update_by_id(&self, id: &Uuid, changes: E::Changes) -> Result<Option<E>, StoreError> {
        let Some(mut record) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        record.apply(changes);

        let sql = format!("UPDATE {} SET body = $2 WHERE id = $1", E::COLLECTION);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(&record))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::COLLECTION);
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

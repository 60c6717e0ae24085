use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, sync::Mutex};
use uuid::Uuid;

use crate::{
    entities::entity::{newest_first, Entity},
    errors::StoreError,
    repositories::collection::Repository,
};

/// Flat-file store: one JSON array per collection, re-read on every call
/// and rewritten wholesale on every mutation.
pub struct JsonFileRepo<E: Entity> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonFileRepo<E> {
    /// Opens `<data_dir>/<collection>.json`, creating an empty array if missing.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).await?;

        let path = data_dir.join(format!("{}.json", E::COLLECTION));
        match fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&path, b"[]").await?;
                tracing::info!(path = %path.display(), "Initialized empty collection file");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(JsonFileRepo {
            path,
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<E>, StoreError> {
        let raw = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn save(&self, records: &[E]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for JsonFileRepo<E> {
    async fn check_connection(&self) -> Result<(), StoreError> {
        fs::metadata(&self.path).await?;
        Ok(())
    }

    async fn insert(&self, draft: E::Draft) -> Result<E, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let record = E::materialize(Uuid::new_v4(), Utc::now(), draft);
        records.push(record.clone());
        self.save(&records).await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<E>, StoreError> {
        Ok(newest_first(self.load().await?))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<E>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id() == *id))
    }

    async fn update_by_id(&self, id: &Uuid, changes: E::Changes) -> Result<Option<E>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let Some(record) = records.iter_mut().find(|r| r.id() == *id) else {
            return Ok(None);
        };
        record.apply(changes);
        let updated = record.clone();

        self.save(&records).await?;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| r.id() != *id);
        if records.len() != before {
            self.save(&records).await?;
        }
        Ok(())
    }
}

use std::sync::Arc;

use crate::{
    db::postgres::create_pool,
    entities::{contact_me::ContactMeMessage, project::Project},
    errors::StoreError,
    repositories::{
        collection::Repository,
        json_file::JsonFileRepo,
        memory::MemoryRepo,
        sqlx_repo::{run_migrations, SqlxDocumentRepo},
    },
    settings::{AppConfig, StorageBackend},
};

/// The collection stores shared by every worker.
#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: Arc<dyn Repository<Project>>,
    pub contact_repo: Arc<dyn Repository<ContactMeMessage>>,
}

impl SharedRepositories {
    pub fn in_memory() -> Self {
        SharedRepositories {
            project_repo: Arc::new(MemoryRepo::<Project>::new()),
            contact_repo: Arc::new(MemoryRepo::<ContactMeMessage>::new()),
        }
    }

    pub async fn json_file(data_dir: &str) -> Result<Self, StoreError> {
        Ok(SharedRepositories {
            project_repo: Arc::new(JsonFileRepo::<Project>::open(data_dir).await?),
            contact_repo: Arc::new(JsonFileRepo::<ContactMeMessage>::open(data_dir).await?),
        })
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            project_repo: Arc::new(SqlxDocumentRepo::<Project>::new(pool.clone())),
            contact_repo: Arc::new(SqlxDocumentRepo::<ContactMeMessage>::new(pool)),
        }
    }

    /// Opens the backend named by `storage_backend`. PostgreSQL is migrated
    /// before any request is served.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let repos = match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Self::in_memory()
            }
            StorageBackend::JsonFile => Self::json_file(&config.data_dir).await?,
            StorageBackend::Postgres => {
                let pool = create_pool(&config.database_url).await?;
                run_migrations(&pool).await?;
                Self::postgres(pool)
            }
        };

        tracing::info!(backend = ?config.storage_backend, "Storage ready");
        Ok(repos)
    }
}

use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;
pub mod startup;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, storage, utils};

use auth::jwt::JwtService;
use entities::admin::AdminIdentity;
use handlers::system::HealthCache;
use errors::PasswordError;
use repositories::image::ImageStore;
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler,
    contact::ContactMeHandler,
    crud::CrudHandler,
    project::ProjectHandler,
    upload::UploadHandler,
};

pub struct AppState {
    pub name: String,
    pub project_handler: ProjectHandler,
    pub contact_handler: ContactMeHandler,
    pub auth_handler: AppAuthHandler,
    pub upload_handler: UploadHandler,
    pub health_cache: HealthCache,
}

pub type AppAuthHandler = AuthHandler<JwtService>;

impl AppState {
    /// Wires the handlers over already opened stores. Fails only when the
    /// admin password cannot be hashed.
    pub fn new(
        config: &AppConfig,
        repos: SharedRepositories,
        image_store: Arc<dyn ImageStore>,
    ) -> Result<Self, PasswordError> {
        let admin = AdminIdentity::new(&config.admin_email, &config.admin_password)?;
        let auth_handler = AuthHandler::new(
            admin,
            JwtService::new(config),
            config.admin_redirect_url.clone(),
        );

        Ok(AppState {
            name: config.name.clone(),
            project_handler: ProjectHandler::new(CrudHandler::new(repos.project_repo)),
            contact_handler: ContactMeHandler::new(CrudHandler::new(repos.contact_repo)),
            auth_handler,
            upload_handler: UploadHandler::new(image_store, config.upload_max_bytes),
            health_cache: HealthCache::default(),
        })
    }
}

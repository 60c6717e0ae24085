use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod admin;
mod contacts;
mod json_error;
mod projects;
mod upload;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(admin::config_routes)
            .configure(projects::config_routes)
            .configure(contacts::config_routes)
            .configure(upload::config_routes)
    );

    cfg.configure(json_error::config_routes);
}

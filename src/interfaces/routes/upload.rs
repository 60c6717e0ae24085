use actix_web::web;

use crate::handlers::upload;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/upload-image")
            .route(web::post().to(upload::upload_image))
    );
}

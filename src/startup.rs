use std::net::TcpListener;

use actix_cors::Cors;
use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{dev::Server, http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{
    constants::UPLOADS_ROUTE,
    handlers::json_error::handle_multipart_error,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 16 * 1024;

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

/// Builds the HTTP server on an already bound listener. The caller owns
/// shutdown: OS signal handling is left to `graceful_shutdown`.
pub fn run(
    listener: TcpListener,
    state: web::Data<AppState>,
    config: &AppConfig,
) -> std::io::Result<Server> {
    let cors_origins = config.cors_origins();
    let upload_dir = config.upload_dir.clone();
    let multipart_limit = config.upload_max_bytes + MULTIPART_OVERHEAD;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(multipart_limit)
                    .error_handler(handle_multipart_error),
            )
            // AuthMiddleware needs the unwrapped body type, so it goes innermost
            .wrap(AuthMiddleware)
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .service(Files::new(UPLOADS_ROUTE, &upload_dir))
            .configure(configure_routes)
    })
    .workers(config.worker_count.max(1))
    .disable_signals()
    .listen(listener)?
    .run();

    Ok(server)
}

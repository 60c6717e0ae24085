use actix_web::web;

use crate::handlers::json_error::{handle_json_error, handle_path_error, handle_query_error, not_found};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(64 * 1024).error_handler(handle_json_error));
    cfg.app_data(web::PathConfig::default().error_handler(handle_path_error));
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_error));
    cfg.default_service(web::route().to(not_found));
}

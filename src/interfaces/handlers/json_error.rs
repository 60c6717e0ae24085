use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};

use crate::errors::{error_envelope, AppError};

pub fn json_error(status: StatusCode, kind: &str, message: &str) -> HttpResponse {
    error_envelope(status, kind, message, None)
}

pub fn handle_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    let kind = match status {
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "bad_request",
        _ => "validation_error",
    };
    let response = json_error(status, kind, &format!("Invalid JSON body: {}", err));
    actix_web::error::InternalError::from_response(err, response).into()
}

pub fn handle_path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = json_error(StatusCode::BAD_REQUEST, "validation_error", "Invalid path parameter");
    actix_web::error::InternalError::from_response(err, response).into()
}

pub fn handle_query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = json_error(StatusCode::BAD_REQUEST, "validation_error", &format!("Invalid query string: {}", err));
    actix_web::error::InternalError::from_response(err, response).into()
}

pub fn handle_multipart_error(err: actix_multipart::MultipartError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!("Rejected multipart payload: {}", err);
    AppError::from(err).into()
}

pub async fn not_found() -> HttpResponse {
    json_error(StatusCode::NOT_FOUND, "not_found", "Resource not found")
}

use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use jsonwebtoken::errors::{ErrorKind, Error as JwtError};
use serde::Serialize;
use validator::ValidationErrors;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Builds the error envelope shared by every endpoint:
/// `{"success": false, "message", "error": {"kind", "message", "details"?}}`.
/// The top-level `message` is what the admin page displays.
pub fn error_envelope(
    status: StatusCode,
    kind: &str,
    message: &str,
    details: Option<&[FieldError]>,
) -> HttpResponse {
    let mut error = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    if let Some(details) = details {
        error["details"] = serde_json::json!(details);
    }

    HttpResponse::build(status)
        .insert_header(ContentType::json())
        .json(serde_json::json!({
            "success": false,
            "message": message,
            "error": error,
        }))
}

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Validation failed: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "{}", msg),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "{}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(errors) => {
                error_envelope(self.status_code(), self.kind(), "Validation failed", Some(errors))
            }
            // Internal details stay in the server log
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                error_envelope(self.status_code(), self.kind(), INTERNAL_ERROR_MESSAGE, None)
            }
            _ => error_envelope(self.status_code(), self.kind(), &self.to_string(), None),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| FieldError {
                    field: camel_case(field),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

/// Validation reports Rust field names; clients see the camelCase wire names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        match err {
            actix_multipart::MultipartError::Payload(_) => {
                AppError::PayloadTooLarge("File too large".to_string())
            }
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Failures of the persistence layer. Never shown to clients verbatim.
#[derive(Debug, Display)]
pub enum StoreError {
    #[display("I/O error: {_0}")]
    Io(std::io::Error),

    #[display("Malformed persisted data: {_0}")]
    Serialization(serde_json::Error),

    #[display("Database error: {_0}")]
    Database(sqlx::Error),

    #[display("Migration error: {_0}")]
    Migration(sqlx::migrate::MigrateError),
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(err)
    }
}

#[derive(Debug, Display, PartialEq)]
pub enum AuthError {
    #[display("Invalid token")]
    InvalidToken,

    #[display("Invalid email or password")]
    WrongCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Token has expired")]
    TokenExpired,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Missing JWT service")]
    MissingJwtService,

    #[display("Forbidden: {_0}")]
    Forbidden(String),
}

impl AuthError {
    fn kind(&self) -> &'static str {
        match self {
            AuthError::TokenCreation | AuthError::MissingJwtService => "internal_error",
            AuthError::Forbidden(_) => "forbidden",
            _ => "unauthorized",
        }
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AuthError::TokenCreation | AuthError::MissingJwtService => {
                tracing::error!(error = %self, "Authentication infrastructure failure");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        };
        error_envelope(self.status_code(), self.kind(), &message, None)
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingJwtService => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(_: ValidationErrors) -> Self {
        AuthError::WrongCredentials
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

impl std::error::Error for PasswordError {}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn internal_errors_hide_their_detail() {
        let err = AppError::from(StoreError::Io(std::io::Error::other("disk on fire")));
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["kind"], "internal_error");
        assert_eq!(body["error"]["message"], "Internal server error");
        assert!(!body.to_string().contains("disk on fire"));
    }

    #[actix_rt::test]
    async fn validation_errors_carry_field_details() {
        let err = AppError::ValidationError(vec![FieldError {
            field: "title".into(),
            message: "Title is required".into(),
        }]);
        let body = body_json(err.error_response()).await;

        assert_eq!(body["error"]["kind"], "validation_error");
        assert_eq!(body["error"]["details"][0]["field"], "title");
    }

    #[test]
    fn field_names_use_wire_casing() {
        assert_eq!(camel_case("project_link"), "projectLink");
        assert_eq!(camel_case("image_url"), "imageUrl");
        assert_eq!(camel_case("title"), "title");
    }

    #[test]
    fn validation_details_are_camel_case_and_sorted() {
        use validator::Validate;

        let form = crate::entities::project::ProjectForm {
            title: String::new(),
            github_link: Some("not a url".into()),
            ..Default::default()
        };
        let AppError::ValidationError(fields) = AppError::from(form.validate().unwrap_err()) else {
            panic!("expected validation error");
        };

        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, ["githubLink", "title"]);
    }

    #[actix_rt::test]
    async fn wrong_credentials_do_not_say_which_field_failed() {
        let response = AuthError::WrongCredentials.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid email or password");
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }
}

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::token::Claims, errors::AuthError};

/// Admin claims attached by `AuthMiddleware`. Taking this as a handler
/// argument is what makes a route admin-only.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl AdminClaims {
    pub fn email(&self) -> &str {
        &self.0.sub
    }
}

fn admin_claims(req: &HttpRequest) -> Result<AdminClaims, AuthError> {
    let extensions = req.extensions();
    let claims = extensions.get::<Claims>().ok_or(AuthError::MissingCredentials)?;

    if !claims.admin {
        tracing::warn!(sub = %claims.sub, path = %req.path(), "Non-admin token on admin route");
        return Err(AuthError::Forbidden("Admin access required".into()));
    }
    Ok(AdminClaims(claims.clone()))
}

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(admin_claims(req).map_err(Into::into))
    }
}

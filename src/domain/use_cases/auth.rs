use validator::Validate;

use crate::auth::password::verify_password;
use crate::entities::admin::{AdminIdentity, LoginUser};
use crate::entities::token::LoginResponse;
use crate::errors::AuthError;
use crate::repositories::token::TokenServiceRepository;

pub struct AuthHandler<T>
where
    T: TokenServiceRepository,
{
    pub admin: AdminIdentity,
    pub token_service: T,
    pub redirect_url: String,
}

impl<T> AuthHandler<T>
where
    T: TokenServiceRepository,
{
    pub fn new(admin: AdminIdentity, token_service: T, redirect_url: String) -> Self {
        AuthHandler {
            admin,
            token_service,
            redirect_url,
        }
    }

    /// Checks the submitted credentials against the configured admin and
    /// issues a bearer token. Both fields are always checked so the
    /// failure does not reveal which one was wrong.
    pub fn login(&self, request: LoginUser) -> Result<LoginResponse, AuthError> {
        request.validate()?;

        let email_matches = self.admin.matches_email(&request.email);
        let password_matches = verify_password(&request.password, self.admin.password_hash())
            .map_err(|e| {
                tracing::error!("Admin password verification failed: {}", e);
                AuthError::WrongCredentials
            })?;

        if !(email_matches && password_matches) {
            tracing::warn!("Rejected admin login attempt");
            return Err(AuthError::WrongCredentials);
        }

        let token = self.token_service.create_jwt(self.admin.email())?;

        tracing::info!("Admin logged in successfully");
        Ok(LoginResponse::new(
            token,
            self.redirect_url.clone(),
            self.token_service.expires_in(),
        ))
    }
}

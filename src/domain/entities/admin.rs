use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;
use zeroize::Zeroizing;

use crate::{auth::password::hash_password, errors::PasswordError};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(length(min = 1, max = 254, message = "Email cannot be empty"))]
    pub email: String,

    #[validate(length(min = 1, max = 1024, message = "Password cannot be empty"))]
    pub password: String,
}

/// The single configured administrator. Only the Argon2 hash of the
/// password is kept after construction.
#[derive(Clone)]
pub struct AdminIdentity {
    email: String,
    password_hash: String,
}

impl AdminIdentity {
    pub fn new(email: &str, password: &str) -> Result<Self, PasswordError> {
        let password = Zeroizing::new(password.to_string());

        Ok(AdminIdentity {
            email: normalize_email(email),
            password_hash: hash_password(&password)?,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email == normalize_email(email)
    }
}

impl fmt::Debug for AdminIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminIdentity")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

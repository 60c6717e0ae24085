use serde::{Serialize, Deserialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub admin: bool,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub redirect_url: String,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl LoginResponse {
    pub fn new(token: String, redirect_url: String, expires_in: i64) -> Self {
        LoginResponse {
            success: true,
            message: "Login successful!".to_string(),
            redirect_url,
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

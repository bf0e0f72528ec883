//! Authentication service

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::claims::UserClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Verify the configured admin credentials and issue a JWT.
    /// Returns the token and its validity in seconds.
    pub fn login(&self, username: &str, password: &str) -> AppResult<(String, u64)> {
        if username != self.config.admin_username {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let parsed = PasswordHash::new(&self.config.admin_password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid admin password hash: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::Authentication("Invalid credentials".to_string()))?;

        let claims = UserClaims::new(username, self.config.jwt_expiration_hours);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, self.config.jwt_expiration_hours * 3600))
    }
}

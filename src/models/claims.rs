//! JWT claims for the authenticated principal

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims embedded in API tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Authenticated username
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    pub fn new(username: &str, validity_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(validity_hours as i64)).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let claims = UserClaims::new("admin", 24);
        let token = claims.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.sub, "admin");
        assert_eq!(parsed.exp, claims.exp);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = UserClaims::new("admin", 24);
        let token = claims.create_token("test-secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}

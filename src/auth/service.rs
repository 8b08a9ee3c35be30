use crate::auth::token::{self, Claims, TokenError};
use crate::core::config::AuthConfig;
use crate::core::error::ApiError;
use crate::stores::user_store::UserStore;
use anyhow::Context;

/// Verifies submitted credentials and issues signed access tokens.
///
/// Holds the signing secret and hashing cost taken from [`AuthConfig`] at
/// construction; nothing here is process-global.
pub struct AuthService {
    secret: Vec<u8>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.secret.as_bytes().to_vec(),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Hash a plaintext password for storage
    pub fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        let hash = bcrypt::hash(password, self.bcrypt_cost)
            .context("Failed to hash password")?;
        Ok(hash)
    }

    /// Verify credentials against the store and issue a token.
    ///
    /// Empty credentials fail fast before any lookup. The bcrypt check is
    /// constant-time-safe. On success the token is returned with the
    /// `BEARER ` scheme prefix expected by downstream consumers.
    pub fn authenticate(
        &self,
        store: &UserStore,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::MissingCredentials);
        }

        let user = store
            .find_by_username(username)
            .ok_or(ApiError::AuthUserNotFound)?;

        let matches = bcrypt::verify(password, &user.password_hash)
            .context("Failed to verify password")?;

        if !matches {
            return Err(ApiError::WrongPassword);
        }

        let claims = Claims {
            sub: user.id,
            username: user.username,
        };
        let token = token::sign(&claims, &self.secret)?;

        Ok(format!("BEARER {token}"))
    }

    /// Check a previously issued token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        token::verify(token, &self.secret)
    }
}

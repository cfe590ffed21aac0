//! Password hashing and session tokens.
//!
//! Passwords are stored as bcrypt hashes; sessions are stateless HS256 JWTs
//! carrying the user ID, valid for seven days. The [`AuthUser`] extractor
//! pulls the bearer token out of the `Authorization` header and rejects the
//! request with 401 before the handler runs.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Token lifetime in seconds (7 days).
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Issue a signed session token for a user.
pub fn issue_token(user_id: &str, secret: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: chrono::Utc::now().timestamp() + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify a session token and return its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// The authenticated user's ID, extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token's `sub` claim.
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims = verify_token(token, &state.jwt_secret)?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token("user-123", "secret").unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_token("user-123", "secret").unwrap();
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_token_rejected_when_malformed() {
        assert!(matches!(
            verify_token("not.a.token", "secret"),
            Err(ApiError::Unauthorized)
        ));
    }
}

//! Session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use carecamp_config::JwtConfig;
use carecamp_core::AppError;

use crate::claims::Claims;

/// Creates a signed session token for the given email.
///
/// The token expires `jwt_config.token_expiry` seconds after issuance
/// (30 days by default).
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_token(email: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.token_expiry as usize;

    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies a session token's signature and expiry.
///
/// # Errors
///
/// Returns an unauthorized error for any invalid token. Expired, malformed,
/// and badly signed tokens are indistinguishable to the caller.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("unauthorized access"))
}

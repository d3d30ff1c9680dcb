use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use carecamp_auth::{Claims, TOKEN_COOKIE, verify_token};
use carecamp_core::AppError;

use crate::state::AppState;

/// Extractor that validates the session cookie and provides the caller's
/// identity claims. Handlers take it as an argument; routes without it are
/// public.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The authenticated caller's email.
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Self-ownership check: the email named in the request path or body
    /// must belong to the caller. Emails compare case-insensitively.
    pub fn require_self(&self, email: &str) -> Result<(), AppError> {
        if !self.0.email.eq_ignore_ascii_case(email) {
            return Err(AppError::forbidden("Forbidden access"));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::unauthorized("unauthorized access"))?;

        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::unauthorized("unauthorized access"))?;

        let claims = verify_token(&token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

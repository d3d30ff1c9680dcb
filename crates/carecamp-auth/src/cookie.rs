//! The session cookie that carries the token.
//!
//! The cookie is http-only so client-side script can never read it. In
//! production (`cookie_secure`) it is `Secure` with `SameSite=None` for the
//! cross-site deployed front-end; in development it stays `SameSite=Strict`
//! and non-secure so plain-HTTP localhost front-ends work.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use carecamp_config::JwtConfig;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

fn same_site(jwt_config: &JwtConfig) -> SameSite {
    if jwt_config.cookie_secure {
        SameSite::None
    } else {
        SameSite::Strict
    }
}

/// Builds the session cookie holding a freshly issued token.
pub fn session_cookie(token: String, jwt_config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(jwt_config.cookie_secure)
        .same_site(same_site(jwt_config))
        .max_age(Duration::seconds(jwt_config.token_expiry))
        .build()
}

/// Builds the expired cookie that clears the session on logout.
///
/// Attributes must match [`session_cookie`] for browsers to drop the
/// original.
pub fn removal_cookie(jwt_config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(jwt_config.cookie_secure)
        .same_site(same_site(jwt_config))
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cookie_secure: bool) -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry: 2_592_000,
            cookie_secure,
        }
    }

    #[test]
    fn development_cookie_is_strict_and_not_secure() {
        let cookie = session_cookie("abc".to_string(), &config(false));
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(2_592_000)));
    }

    #[test]
    fn production_cookie_is_none_and_secure() {
        let cookie = session_cookie("abc".to_string(), &config(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie(&config(false));
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}

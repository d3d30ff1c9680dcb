use std::env;

/// Token signing and session-cookie settings.
///
/// `cookie_secure` follows `APP_ENV`: outside production the cookie is
/// left non-secure and same-site strict so local front-ends over plain
/// HTTP can authenticate.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token validity window in seconds (default: 30 days)
    pub token_expiry: i64,
    pub cookie_secure: bool,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2_592_000), // 30 days
            cookie_secure: env::var("APP_ENV")
                .map(|e| e == "production")
                .unwrap_or(false),
        }
    }
}

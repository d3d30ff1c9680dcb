use serde::{Deserialize, Serialize};

/// Identity claims embedded in a session token.
///
/// The email is the principal's identity everywhere in the system; roles
/// are deliberately not embedded and are read from the store when an
/// admin-gated route needs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

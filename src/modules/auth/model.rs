use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /jwt`: the identity to issue a session for.
///
/// The front-end authenticates the user (federated sign-in) before asking
/// this server for a session token, so the only claim material is the
/// email.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IssueTokenDto {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
}

/// Generic message body for endpoints that report an outcome in prose.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

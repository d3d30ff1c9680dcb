use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument};
use utoipa::ToSchema;

use carecamp_auth::{create_token, removal_cookie, session_cookie};
use carecamp_core::AppError;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{IssueTokenDto, TokenResponse};

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Issue a session token and set the session cookie
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = IssueTokenDto,
    responses(
        (status = 200, description = "Session cookie set", body = TokenResponse),
        (status = 422, description = "Invalid email", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip(state, jar))]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<IssueTokenDto>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let token = create_token(&dto.email, &state.jwt_config)?;

    info!(email = %dto.email, "Session token issued");

    Ok((
        jar.add(session_cookie(token, &state.jwt_config)),
        Json(TokenResponse { success: true }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = TokenResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<TokenResponse>) {
    (
        jar.add(removal_cookie(&state.jwt_config)),
        Json(TokenResponse { success: true }),
    )
}

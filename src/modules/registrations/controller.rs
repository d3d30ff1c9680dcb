use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use carecamp_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateRegistrationDto, PaginatedRegistrationsResponse, Registration, RegistrationFilterParams,
};
use super::service::RegistrationService;

/// Register the caller for a camp
#[utoipa::path(
    post,
    path = "/registered-camps",
    request_body = CreateRegistrationDto,
    responses(
        (status = 201, description = "Registration created and participant count updated", body = Registration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - participant email is not the caller's", body = ErrorResponse),
        (status = 404, description = "Camp not found", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRegistrationDto>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    auth_user.require_self(&dto.participant_email)?;

    let registration = RegistrationService::create_registration(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// List all registrations (admin only)
#[utoipa::path(
    get,
    path = "/registered-camps",
    params(
        ("search" = Option<String>, Query, description = "Substring match on participant or camp name"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "Paginated list of registrations", body = PaginatedRegistrationsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, filters))]
pub async fn get_registrations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    filters: Result<Query<RegistrationFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedRegistrationsResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    check_admin(&state.db, &auth_user).await?;

    let registrations = RegistrationService::get_registrations(&state.db, filters).await?;
    Ok(Json(registrations))
}

/// Confirm a registration (admin only)
#[utoipa::path(
    patch,
    path = "/registered-camps/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    responses(
        (status = 200, description = "Confirmed registration", body = Registration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn confirm_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, AppError> {
    check_admin(&state.db, &auth_user).await?;

    let registration = RegistrationService::confirm_registration(&state.db, id).await?;
    Ok(Json(registration))
}

/// List the caller's registrations
#[utoipa::path(
    get,
    path = "/user-registered-camps/{email}",
    params(
        ("email" = String, Path, description = "Participant email; must be the caller's")
    ),
    responses(
        (status = 200, description = "The caller's registrations", body = Vec<Registration>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's email", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_user_registrations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<Registration>>, AppError> {
    auth_user.require_self(&email)?;

    let registrations = RegistrationService::get_registrations_by_email(&state.db, &email).await?;
    Ok(Json(registrations))
}

/// Fetch one of the caller's registrations
#[utoipa::path(
    get,
    path = "/user-registered-camp/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    responses(
        (status = 200, description = "The registration", body = Registration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's registration", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_user_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, AppError> {
    let registration = RegistrationService::get_registration_by_id(&state.db, id).await?;
    auth_user.require_self(&registration.participant_email)?;

    Ok(Json(registration))
}

/// Delete a registration (admin only)
#[utoipa::path(
    delete,
    path = "/delete-registration/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_admin(&state.db, &auth_user).await?;

    RegistrationService::delete_registration(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cancel one of the caller's registrations
#[utoipa::path(
    delete,
    path = "/cancel-registration/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    responses(
        (status = 204, description = "Registration cancelled"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's registration", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "Registrations",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn cancel_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    RegistrationService::cancel_registration(&state.db, id, auth_user.email()).await?;
    Ok(StatusCode::NO_CONTENT)
}

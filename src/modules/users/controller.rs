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
    AdminStatusResponse, PaginatedUsersResponse, UpdateProfileDto, UpsertUserDto, User,
    UserFilterParams,
};
use super::service::UserService;

/// Register the signed-in user, or return the existing account
#[utoipa::path(
    post,
    path = "/users",
    request_body = UpsertUserDto,
    responses(
        (status = 200, description = "User stored or already present", body = User),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpsertUserDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::upsert_user(&state.db, dto).await?;
    Ok(Json(user))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    params(
        ("search" = Option<String>, Query, description = "Substring match on name or email"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "Paginated list of users", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, filters))]
pub async fn get_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
    filters: Result<Query<UserFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    check_admin(&state.db, &auth_user).await?;

    let users = UserService::get_users(&state.db, filters).await?;
    Ok(Json(users))
}

/// Update own profile
#[utoipa::path(
    patch,
    path = "/users/{email}",
    params(
        ("email" = String, Path, description = "Email of the profile to update")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's profile", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    auth_user.require_self(&email)?;

    let user = UserService::update_profile(&state.db, &email, dto).await?;
    Ok(Json(user))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_admin(&state.db, &auth_user).await?;

    UserService::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check whether the caller holds the admin role
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    params(
        ("email" = String, Path, description = "Email to check; must be the caller's")
    ),
    responses(
        (status = 200, description = "Role check result", body = AdminStatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's email", body = ErrorResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_admin_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, AppError> {
    auth_user.require_self(&email)?;

    let admin = UserService::is_admin(&state.db, &email).await?;
    Ok(Json(AdminStatusResponse { admin }))
}

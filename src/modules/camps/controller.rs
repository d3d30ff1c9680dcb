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

use super::model::{Camp, CampFilterParams, CreateCampDto, UpdateCampDto};
use super::service::CampService;

/// List camps with optional search, sort, and limit
#[utoipa::path(
    get,
    path = "/camps",
    params(
        ("search" = Option<String>, Query, description = "Substring match on name, location, or professional"),
        ("sort" = Option<String>, Query, description = "Sort key: participants, fees, or name"),
        ("limit" = Option<i64>, Query, description = "Maximum number of results")
    ),
    responses(
        (status = 200, description = "List of camps", body = Vec<Camp>)
    ),
    tag = "Camps"
)]
#[instrument(skip(state, filters))]
pub async fn get_camps(
    State(state): State<AppState>,
    filters: Result<Query<CampFilterParams>, QueryRejection>,
) -> Result<Json<Vec<Camp>>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let camps = CampService::get_camps(&state.db, filters).await?;
    Ok(Json(camps))
}

/// Camp details
#[utoipa::path(
    get,
    path = "/camps/{id}",
    params(
        ("id" = Uuid, Path, description = "Camp ID")
    ),
    responses(
        (status = 200, description = "Camp details", body = Camp),
        (status = 404, description = "Camp not found", body = ErrorResponse)
    ),
    tag = "Camps"
)]
#[instrument(skip(state))]
pub async fn get_camp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Camp>, AppError> {
    let camp = CampService::get_camp_by_id(&state.db, id).await?;
    Ok(Json(camp))
}

/// Create a camp (admin only)
#[utoipa::path(
    post,
    path = "/camps",
    request_body = CreateCampDto,
    responses(
        (status = 201, description = "Camp created", body = Camp),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Camps",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_camp(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCampDto>,
) -> Result<(StatusCode, Json<Camp>), AppError> {
    check_admin(&state.db, &auth_user).await?;

    let camp = CampService::create_camp(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(camp)))
}

/// Update a camp (admin only)
#[utoipa::path(
    patch,
    path = "/update-camp/{id}",
    params(
        ("id" = Uuid, Path, description = "Camp ID")
    ),
    request_body = UpdateCampDto,
    responses(
        (status = 200, description = "Updated camp", body = Camp),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Camp not found", body = ErrorResponse)
    ),
    tag = "Camps",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_camp(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCampDto>,
) -> Result<Json<Camp>, AppError> {
    check_admin(&state.db, &auth_user).await?;

    let camp = CampService::update_camp(&state.db, id, dto).await?;
    Ok(Json(camp))
}

/// Delete a camp (admin only)
#[utoipa::path(
    delete,
    path = "/delete-camp/{id}",
    params(
        ("id" = Uuid, Path, description = "Camp ID")
    ),
    responses(
        (status = 204, description = "Camp deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Camp not found", body = ErrorResponse)
    ),
    tag = "Camps",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_camp(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_admin(&state.db, &auth_user).await?;

    CampService::delete_camp(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

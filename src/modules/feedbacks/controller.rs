use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::instrument;

use carecamp_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Feedback, FeedbackFilterParams, SubmitFeedbackDto};
use super::service::FeedbackService;

/// List feedbacks, newest first
#[utoipa::path(
    get,
    path = "/feedbacks",
    params(
        ("camp_id" = Option<uuid::Uuid>, Query, description = "Restrict to one camp"),
        ("limit" = Option<i64>, Query, description = "Maximum number of results")
    ),
    responses(
        (status = 200, description = "List of feedbacks", body = Vec<Feedback>)
    ),
    tag = "Feedbacks"
)]
#[instrument(skip(state, filters))]
pub async fn get_feedbacks(
    State(state): State<AppState>,
    filters: Result<Query<FeedbackFilterParams>, QueryRejection>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let feedbacks = FeedbackService::get_feedbacks(&state.db, filters).await?;
    Ok(Json(feedbacks))
}

/// Submit or replace feedback for a camp
#[utoipa::path(
    post,
    path = "/feedbacks",
    request_body = SubmitFeedbackDto,
    responses(
        (status = 200, description = "Stored feedback", body = Feedback),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - participant email is not the caller's", body = ErrorResponse),
        (status = 404, description = "Camp not found", body = ErrorResponse)
    ),
    tag = "Feedbacks",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SubmitFeedbackDto>,
) -> Result<Json<Feedback>, AppError> {
    auth_user.require_self(&dto.participant_email)?;

    let feedback = FeedbackService::submit_feedback(&state.db, dto).await?;
    Ok(Json(feedback))
}

//! Feedback entity and DTOs.
//!
//! One feedback per (camp, participant email); resubmitting replaces the
//! stored rating and details.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use carecamp_core::PaginationParams;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub camp_id: Uuid,
    pub camp_name: String,
    pub participant_name: String,
    pub participant_email: String,
    pub rating: i32,
    pub details: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `POST /feedbacks`. The participant email must be the
/// authenticated caller's.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct SubmitFeedbackDto {
    pub camp_id: Uuid,
    #[validate(length(min = 1))]
    pub participant_name: String,
    #[validate(email)]
    pub participant_email: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 1))]
    pub details: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FeedbackFilterParams {
    /// Restrict to one camp
    pub camp_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

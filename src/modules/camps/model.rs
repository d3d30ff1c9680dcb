//! Camp entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use carecamp_core::PaginationParams;

/// A medical camp listing.
///
/// `fees` is in major currency units; the payment flow converts to minor
/// units when talking to the provider. `participant_count` counts
/// successful registrations and is only ever moved by the atomic increment
/// in the camps service.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Camp {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub location: String,
    pub scheduled_date: chrono::NaiveDate,
    pub scheduled_time: String,
    pub fees: i64,
    pub healthcare_professional: String,
    pub description: String,
    pub participant_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateCampDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub scheduled_date: chrono::NaiveDate,
    #[validate(length(min = 1))]
    pub scheduled_time: String,
    #[validate(range(min = 0))]
    pub fees: i64,
    #[validate(length(min = 1))]
    pub healthcare_professional: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Partial camp update; only named fields change.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateCampDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub scheduled_date: Option<chrono::NaiveDate>,
    #[validate(length(min = 1))]
    pub scheduled_time: Option<String>,
    #[validate(range(min = 0))]
    pub fees: Option<i64>,
    #[validate(length(min = 1))]
    pub healthcare_professional: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CampFilterParams {
    /// Case-insensitive substring match on name, location, or professional
    pub search: Option<String>,
    /// Sort key: `participants`, `fees`, or `name` (default: newest first)
    pub sort: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

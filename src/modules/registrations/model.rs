//! Registration entity and DTOs.
//!
//! A registration snapshots the camp's name and fees at creation time, so
//! later camp edits do not change what the participant owes or what their
//! history shows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use carecamp_core::{PaginationMeta, PaginationParams};

/// Payment status values stored on a registration row.
pub mod payment_status {
    pub const UNPAID: &str = "Unpaid";
    pub const PAID: &str = "Paid";
}

/// Confirmation status values stored on a registration row.
pub mod confirmation_status {
    pub const PENDING: &str = "Pending";
    pub const CONFIRMED: &str = "Confirmed";
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub camp_id: Uuid,
    pub camp_name: String,
    pub camp_fees: i64,
    pub participant_name: String,
    pub participant_email: String,
    pub payment_status: String,
    pub confirmation_status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `POST /registered-camps`. The participant email must be the
/// authenticated caller's.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateRegistrationDto {
    pub camp_id: Uuid,
    #[validate(length(min = 1))]
    pub participant_name: String,
    #[validate(email)]
    pub participant_email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegistrationFilterParams {
    /// Case-insensitive substring match on participant or camp name
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedRegistrationsResponse {
    pub data: Vec<Registration>,
    pub meta: PaginationMeta,
}

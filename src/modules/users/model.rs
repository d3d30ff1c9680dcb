//! User entity and DTOs.
//!
//! Users are created lazily on first sign-in and carry one of two roles.
//! Role changes never travel over HTTP; the `grant-admin` maintenance
//! command is the only writer of the role column besides the default.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use carecamp_core::{PaginationMeta, PaginationParams};

/// Role values stored on a user row.
pub mod roles {
    pub const USER: &str = "user";
    pub const ADMIN: &str = "admin";
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Sent on first sign-in. Submitting the same email again returns the
/// existing row unchanged.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpsertUserDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub photo_url: Option<String>,
}

/// Partial profile update; only named fields change.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserFilterParams {
    /// Case-insensitive substring match on name or email
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

/// Body of `GET /users/admin/{email}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

//! Payment entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A recorded payment. Immutable once created; `amount` is in minor
/// currency units (the registration's camp fees times 100).
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub camp_name: String,
    pub participant_email: String,
    pub amount: i64,
    pub currency: String,
    pub transaction_id: String,
    pub paid_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `POST /create-payment-intent`.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreatePaymentIntentDto {
    pub registration_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Body of `POST /payment/{id}`: the provider transaction to record. The
/// amount is recomputed server-side from the registration's fee snapshot.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RecordPaymentDto {
    #[validate(length(min = 1))]
    pub transaction_id: String,
}

/// Outcome of recording a payment.
///
/// The payment insert and the registration status flip are two separate
/// store writes; when the second one changes nothing, the payment stays
/// recorded and the caller is told to involve an administrator instead of
/// getting the payment back.
#[derive(Debug)]
pub enum PaymentOutcome {
    Recorded(Payment),
    StatusUpdateFailed,
}

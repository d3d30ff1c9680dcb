use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use uuid::Uuid;

use carecamp_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreatePaymentIntentDto, Payment, PaymentIntentResponse, PaymentOutcome, RecordPaymentDto,
};
use super::service::PaymentService;

/// Create a provider payment intent for a registration
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = CreatePaymentIntentDto,
    responses(
        (status = 200, description = "Client secret for checkout", body = PaymentIntentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's registration", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePaymentIntentDto>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let client_secret = PaymentService::create_intent(
        &state.db,
        &state.payments,
        dto.registration_id,
        auth_user.email(),
    )
    .await?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// Record a completed checkout for a registration
#[utoipa::path(
    post,
    path = "/payment/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    request_body = RecordPaymentDto,
    responses(
        (status = 201, description = "Payment recorded and registration marked paid", body = Payment),
        (status = 200, description = "Payment recorded but registration status unchanged", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's registration", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn record_payment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<RecordPaymentDto>,
) -> Result<Response, AppError> {
    let currency = state.payments.currency().to_string();
    let outcome =
        PaymentService::record_payment(&state.db, &currency, id, dto, auth_user.email()).await?;

    match outcome {
        PaymentOutcome::Recorded(payment) => {
            Ok((StatusCode::CREATED, Json(payment)).into_response())
        }
        PaymentOutcome::StatusUpdateFailed => Ok(Json(MessageResponse {
            message: "Payment recorded but the registration status was not updated. Please \
                      contact an administrator."
                .to_string(),
        })
        .into_response()),
    }
}

/// The caller's payment history
#[utoipa::path(
    get,
    path = "/payment-history/{email}",
    params(
        ("email" = String, Path, description = "Participant email; must be the caller's")
    ),
    responses(
        (status = 200, description = "The caller's payments, newest first", body = Vec<Payment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the caller's email", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_payment_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>, AppError> {
    auth_user.require_self(&email)?;

    let payments = PaymentService::get_payment_history(&state.db, &email).await?;
    Ok(Json(payments))
}

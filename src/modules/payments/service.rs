use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use carecamp_core::AppError;

use crate::modules::registrations::service::RegistrationService;

use super::client::PaymentIntentClient;
use super::model::{Payment, PaymentOutcome, RecordPaymentDto};

const PAYMENT_COLUMNS: &str =
    "id, registration_id, camp_name, participant_email, amount, currency, transaction_id, paid_at";

/// Minor units per major unit of the supported currencies.
const MINOR_UNITS: i64 = 100;

pub struct PaymentService;

impl PaymentService {
    /// Asks the provider for a payment intent covering the registration's
    /// fee snapshot. Only the registration's own participant may start a
    /// checkout.
    #[instrument(skip(db, payments), fields(registration.id = %registration_id))]
    pub async fn create_intent(
        db: &PgPool,
        payments: &PaymentIntentClient,
        registration_id: Uuid,
        caller_email: &str,
    ) -> Result<String, AppError> {
        let registration = RegistrationService::get_registration_by_id(db, registration_id).await?;

        if !registration
            .participant_email
            .eq_ignore_ascii_case(caller_email)
        {
            return Err(AppError::forbidden("Forbidden access"));
        }

        payments
            .create_intent(registration.camp_fees * MINOR_UNITS)
            .await
    }

    /// Records a successful checkout, then flips the registration to
    /// `Paid`.
    ///
    /// The payment insert is not rolled back if the flip changes nothing;
    /// that state is surfaced as [`PaymentOutcome::StatusUpdateFailed`] so
    /// the participant knows to involve an administrator.
    #[instrument(skip(db, dto), fields(registration.id = %registration_id, db.operation = "INSERT", db.table = "payments"))]
    pub async fn record_payment(
        db: &PgPool,
        currency: &str,
        registration_id: Uuid,
        dto: RecordPaymentDto,
        caller_email: &str,
    ) -> Result<PaymentOutcome, AppError> {
        let registration = RegistrationService::get_registration_by_id(db, registration_id).await?;

        if !registration
            .participant_email
            .eq_ignore_ascii_case(caller_email)
        {
            return Err(AppError::forbidden("Forbidden access"));
        }

        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (registration_id, camp_name, participant_email, amount, currency, transaction_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(registration.id)
        .bind(&registration.camp_name)
        .bind(&registration.participant_email)
        .bind(registration.camp_fees * MINOR_UNITS)
        .bind(currency)
        .bind(&dto.transaction_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, registration.id = %registration_id, "Database error recording payment");
            AppError::from(e)
        })?;

        let updated = RegistrationService::mark_paid(db, registration.id).await?;
        if updated == 0 {
            warn!(
                payment.id = %payment.id,
                registration.id = %registration.id,
                "Payment recorded but registration status was not updated"
            );
            return Ok(PaymentOutcome::StatusUpdateFailed);
        }

        info!(
            payment.id = %payment.id,
            registration.id = %registration.id,
            "Payment recorded"
        );

        Ok(PaymentOutcome::Recorded(payment))
    }

    #[instrument(skip(db), fields(payment.email = %email, db.operation = "SELECT", db.table = "payments"))]
    pub async fn get_payment_history(db: &PgPool, email: &str) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments
             WHERE participant_email = $1
             ORDER BY paid_at DESC"
        ))
        .bind(email)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, payment.email = %email, "Database error fetching payment history");
            AppError::from(e)
        })
    }
}

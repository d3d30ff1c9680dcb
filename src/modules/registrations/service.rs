use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use carecamp_core::{AppError, PaginationMeta};

use crate::modules::camps::service::CampService;

use super::model::{
    CreateRegistrationDto, PaginatedRegistrationsResponse, Registration,
    RegistrationFilterParams, confirmation_status, payment_status,
};

const REGISTRATION_COLUMNS: &str = "id, camp_id, camp_name, camp_fees, participant_name, \
     participant_email, payment_status, confirmation_status, created_at, updated_at";

pub struct RegistrationService;

impl RegistrationService {
    /// Creates a registration, then bumps the camp's participant count.
    ///
    /// The two steps are deliberately not one transaction: the insert is
    /// not rolled back if the increment fails, but the caller only gets
    /// the registration back when both steps succeeded.
    #[instrument(skip(db, dto), fields(camp.id = %dto.camp_id, registration.email = %dto.participant_email, db.operation = "INSERT", db.table = "registrations"))]
    pub async fn create_registration(
        db: &PgPool,
        dto: CreateRegistrationDto,
    ) -> Result<Registration, AppError> {
        let camp = CampService::get_camp_by_id(db, dto.camp_id).await?;

        let registration = sqlx::query_as::<_, Registration>(&format!(
            "INSERT INTO registrations (camp_id, camp_name, camp_fees, participant_name, \
             participant_email, payment_status, confirmation_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(camp.id)
        .bind(&camp.name)
        .bind(camp.fees)
        .bind(&dto.participant_name)
        .bind(&dto.participant_email)
        .bind(payment_status::UNPAID)
        .bind(confirmation_status::PENDING)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, camp.id = %dto.camp_id, "Database error creating registration");
            AppError::from(e)
        })?;

        let updated = CampService::increment_participant_count(db, camp.id, 1).await?;
        if updated == 0 {
            warn!(
                registration.id = %registration.id,
                camp.id = %camp.id,
                "Registration stored but camp participant count was not updated"
            );
            return Err(AppError::internal(anyhow::anyhow!(
                "Registration saved but the camp participant count was not updated"
            )));
        }

        info!(
            registration.id = %registration.id,
            camp.id = %camp.id,
            "Registration created"
        );

        Ok(registration)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "registrations"))]
    pub async fn get_registrations(
        db: &PgPool,
        filters: RegistrationFilterParams,
    ) -> Result<PaginatedRegistrationsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.search = ?filters.search,
            "Fetching registrations with pagination"
        );

        let mut count_query = String::from("SELECT COUNT(*) FROM registrations WHERE 1=1");
        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(search) = &filters.search {
            params.push(format!("%{}%", search));
            where_clause.push_str(&format!(
                " AND (participant_name ILIKE ${0} OR camp_name ILIKE ${0})",
                params.len()
            ));
        }

        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting registrations");
            AppError::from(e)
        })?;

        let mut data_query = format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE 1=1");
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY created_at DESC");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut data_sql = sqlx::query_as::<_, Registration>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let registrations = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching registrations");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedRegistrationsResponse {
            data: registrations,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    #[instrument(skip(db), fields(registration.email = %email, db.operation = "SELECT", db.table = "registrations"))]
    pub async fn get_registrations_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations
             WHERE participant_email = $1
             ORDER BY created_at DESC"
        ))
        .bind(email)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, registration.email = %email, "Database error fetching registrations");
            AppError::from(e)
        })
    }

    #[instrument(skip(db), fields(registration.id = %registration_id, db.operation = "SELECT", db.table = "registrations"))]
    pub async fn get_registration_by_id(
        db: &PgPool,
        registration_id: Uuid,
    ) -> Result<Registration, AppError> {
        sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(registration_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, registration.id = %registration_id, "Database error fetching registration");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(registration.id = %registration_id, "Registration not found");
            AppError::not_found(anyhow::anyhow!("Registration not found"))
        })
    }

    /// Admin confirmation: `Pending` -> `Confirmed`.
    #[instrument(skip(db), fields(registration.id = %registration_id, db.operation = "UPDATE", db.table = "registrations"))]
    pub async fn confirm_registration(
        db: &PgPool,
        registration_id: Uuid,
    ) -> Result<Registration, AppError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "UPDATE registrations
             SET confirmation_status = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(confirmation_status::CONFIRMED)
        .bind(registration_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, registration.id = %registration_id, "Database error confirming registration");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Registration not found")))?;

        info!(registration.id = %registration_id, "Registration confirmed");

        Ok(registration)
    }

    /// Admin deletion. The camp's participant count is left untouched.
    #[instrument(skip(db), fields(registration.id = %registration_id, db.operation = "DELETE", db.table = "registrations"))]
    pub async fn delete_registration(db: &PgPool, registration_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(registration_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, registration.id = %registration_id, "Database error deleting registration");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Registration not found"
            )));
        }

        info!(registration.id = %registration_id, "Registration deleted");

        Ok(())
    }

    /// Participant cancellation. Works regardless of confirmation state,
    /// and the camp's participant count is left untouched.
    #[instrument(skip(db), fields(registration.id = %registration_id, db.operation = "DELETE", db.table = "registrations"))]
    pub async fn cancel_registration(
        db: &PgPool,
        registration_id: Uuid,
        caller_email: &str,
    ) -> Result<(), AppError> {
        let registration = Self::get_registration_by_id(db, registration_id).await?;

        if !registration
            .participant_email
            .eq_ignore_ascii_case(caller_email)
        {
            return Err(AppError::forbidden("Forbidden access"));
        }

        sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(registration_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, registration.id = %registration_id, "Database error cancelling registration");
                AppError::from(e)
            })?;

        info!(registration.id = %registration_id, "Registration cancelled");

        Ok(())
    }

    /// Flips the payment status to `Paid`; returns the number of rows
    /// changed so the payments service can surface a partial failure.
    #[instrument(skip(db), fields(registration.id = %registration_id, db.operation = "UPDATE", db.table = "registrations"))]
    pub async fn mark_paid(db: &PgPool, registration_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE registrations SET payment_status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(payment_status::PAID)
        .bind(registration_id)
        .execute(db)
        .await
        .map_err(|e| {
            error!(error = %e, registration.id = %registration_id, "Database error updating payment status");
            AppError::from(e)
        })?;

        Ok(result.rows_affected())
    }
}

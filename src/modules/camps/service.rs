use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use carecamp_core::AppError;

use super::model::{Camp, CampFilterParams, CreateCampDto, UpdateCampDto};

const CAMP_COLUMNS: &str = "id, name, image_url, location, scheduled_date, scheduled_time, fees, \
     healthcare_professional, description, participant_count, created_at, updated_at";

pub struct CampService;

impl CampService {
    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "camps"))]
    pub async fn get_camps(db: &PgPool, filters: CampFilterParams) -> Result<Vec<Camp>, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.search = ?filters.search,
            filter.sort = ?filters.sort,
            "Fetching camps"
        );

        let mut query = format!("SELECT {CAMP_COLUMNS} FROM camps WHERE 1=1");
        let mut params = Vec::new();

        if let Some(search) = &filters.search {
            params.push(format!("%{}%", search));
            query.push_str(&format!(
                " AND (name ILIKE ${0} OR location ILIKE ${0} OR healthcare_professional ILIKE ${0})",
                params.len()
            ));
        }

        // Sort keys map onto a whitelist; anything else falls back to newest first.
        let order_by = match filters.sort.as_deref() {
            Some("participants") => "participant_count DESC",
            Some("fees") => "fees ASC",
            Some("name") => "name ASC",
            _ => "created_at DESC",
        };
        query.push_str(&format!(" ORDER BY {order_by}"));
        query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut sql = sqlx::query_as::<_, Camp>(&query);
        for param in params {
            sql = sql.bind(param);
        }
        sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching camps");
            AppError::from(e)
        })
    }

    #[instrument(skip(db), fields(camp.id = %camp_id, db.operation = "SELECT", db.table = "camps"))]
    pub async fn get_camp_by_id(db: &PgPool, camp_id: Uuid) -> Result<Camp, AppError> {
        sqlx::query_as::<_, Camp>(&format!("SELECT {CAMP_COLUMNS} FROM camps WHERE id = $1"))
            .bind(camp_id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(camp.id = %camp_id, error = %e, "Database error fetching camp");
                AppError::from(e)
            })?
            .ok_or_else(|| {
                debug!(camp.id = %camp_id, "Camp not found");
                AppError::not_found(anyhow::anyhow!("Camp not found"))
            })
    }

    #[instrument(skip(db, dto), fields(camp.name = %dto.name, db.operation = "INSERT", db.table = "camps"))]
    pub async fn create_camp(db: &PgPool, dto: CreateCampDto) -> Result<Camp, AppError> {
        let camp = sqlx::query_as::<_, Camp>(&format!(
            "INSERT INTO camps (name, image_url, location, scheduled_date, scheduled_time, fees, \
             healthcare_professional, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {CAMP_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.image_url)
        .bind(&dto.location)
        .bind(dto.scheduled_date)
        .bind(&dto.scheduled_time)
        .bind(dto.fees)
        .bind(&dto.healthcare_professional)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, camp.name = %dto.name, "Database error creating camp");
            AppError::from(e)
        })?;

        info!(camp.id = %camp.id, camp.name = %camp.name, "Camp created");

        Ok(camp)
    }

    #[instrument(skip(db, dto), fields(camp.id = %camp_id, db.operation = "UPDATE", db.table = "camps"))]
    pub async fn update_camp(
        db: &PgPool,
        camp_id: Uuid,
        dto: UpdateCampDto,
    ) -> Result<Camp, AppError> {
        let camp = sqlx::query_as::<_, Camp>(&format!(
            "UPDATE camps
             SET name = COALESCE($1, name),
                 image_url = COALESCE($2, image_url),
                 location = COALESCE($3, location),
                 scheduled_date = COALESCE($4, scheduled_date),
                 scheduled_time = COALESCE($5, scheduled_time),
                 fees = COALESCE($6, fees),
                 healthcare_professional = COALESCE($7, healthcare_professional),
                 description = COALESCE($8, description),
                 updated_at = NOW()
             WHERE id = $9
             RETURNING {CAMP_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.image_url)
        .bind(&dto.location)
        .bind(dto.scheduled_date)
        .bind(&dto.scheduled_time)
        .bind(dto.fees)
        .bind(&dto.healthcare_professional)
        .bind(&dto.description)
        .bind(camp_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, camp.id = %camp_id, "Database error updating camp");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Camp not found")))?;

        info!(camp.id = %camp.id, "Camp updated");

        Ok(camp)
    }

    #[instrument(skip(db), fields(camp.id = %camp_id, db.operation = "DELETE", db.table = "camps"))]
    pub async fn delete_camp(db: &PgPool, camp_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM camps WHERE id = $1")
            .bind(camp_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, camp.id = %camp_id, "Database error deleting camp");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Camp not found")));
        }

        info!(camp.id = %camp_id, "Camp deleted");

        Ok(())
    }

    /// Atomically moves `participant_count`. Concurrent registrations each
    /// apply their own delta; the count is never recomputed from the
    /// registrations table.
    #[instrument(skip(db), fields(camp.id = %camp_id, db.operation = "UPDATE", db.table = "camps"))]
    pub async fn increment_participant_count(
        db: &PgPool,
        camp_id: Uuid,
        delta: i64,
    ) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE camps SET participant_count = participant_count + $1 WHERE id = $2")
                .bind(delta)
                .bind(camp_id)
                .execute(db)
                .await
                .map_err(|e| {
                    error!(error = %e, camp.id = %camp_id, "Database error updating participant count");
                    AppError::from(e)
                })?;

        Ok(result.rows_affected())
    }
}

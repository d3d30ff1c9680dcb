use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use carecamp_core::AppError;

use crate::modules::camps::service::CampService;

use super::model::{Feedback, FeedbackFilterParams, SubmitFeedbackDto};

const FEEDBACK_COLUMNS: &str = "id, camp_id, camp_name, participant_name, participant_email, \
     rating, details, created_at, updated_at";

pub struct FeedbackService;

impl FeedbackService {
    /// Stores feedback for a camp, replacing any earlier feedback from the
    /// same participant for the same camp.
    #[instrument(skip(db, dto), fields(camp.id = %dto.camp_id, feedback.email = %dto.participant_email, db.operation = "INSERT", db.table = "feedbacks"))]
    pub async fn submit_feedback(
        db: &PgPool,
        dto: SubmitFeedbackDto,
    ) -> Result<Feedback, AppError> {
        let camp = CampService::get_camp_by_id(db, dto.camp_id).await?;

        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "INSERT INTO feedbacks (camp_id, camp_name, participant_name, participant_email, rating, details)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (camp_id, participant_email) DO UPDATE
             SET participant_name = EXCLUDED.participant_name,
                 rating = EXCLUDED.rating,
                 details = EXCLUDED.details,
                 updated_at = NOW()
             RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(camp.id)
        .bind(&camp.name)
        .bind(&dto.participant_name)
        .bind(&dto.participant_email)
        .bind(dto.rating)
        .bind(&dto.details)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, camp.id = %dto.camp_id, "Database error storing feedback");
            AppError::from(e)
        })?;

        info!(
            feedback.id = %feedback.id,
            camp.id = %camp.id,
            rating = %feedback.rating,
            "Feedback stored"
        );

        Ok(feedback)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "feedbacks"))]
    pub async fn get_feedbacks(
        db: &PgPool,
        filters: FeedbackFilterParams,
    ) -> Result<Vec<Feedback>, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.camp_id = ?filters.camp_id,
            "Fetching feedbacks"
        );

        let mut query = format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE 1=1");
        if filters.camp_id.is_some() {
            query.push_str(" AND camp_id = $1");
        }
        query.push_str(" ORDER BY updated_at DESC");
        query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut sql = sqlx::query_as::<_, Feedback>(&query);
        if let Some(camp_id) = filters.camp_id {
            sql = sql.bind(camp_id);
        }
        sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching feedbacks");
            AppError::from(e)
        })
    }
}

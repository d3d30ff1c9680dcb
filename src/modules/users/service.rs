use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use carecamp_core::{AppError, PaginationMeta};

use super::model::{
    PaginatedUsersResponse, UpdateProfileDto, UpsertUserDto, User, UserFilterParams, roles,
};

const USER_COLUMNS: &str = "id, name, email, photo_url, role, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Creates the user on first sign-in; returns the existing row on any
    /// later sign-in with the same email.
    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn upsert_user(db: &PgPool, dto: UpsertUserDto) -> Result<User, AppError> {
        let inserted = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, photo_url) VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.photo_url)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, user.email = %dto.email, "Database error creating user");
            AppError::from(e)
        })?;

        if let Some(user) = inserted {
            info!(user.id = %user.id, user.email = %user.email, "User created");
            return Ok(user);
        }

        debug!(user.email = %dto.email, "User already exists, returning stored row");

        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(&dto.email)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, user.email = %dto.email, "Database error fetching existing user");
            AppError::from(e)
        })
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.search = ?filters.search,
            "Fetching users with pagination"
        );

        let mut count_query = String::from("SELECT COUNT(*) FROM users WHERE 1=1");
        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(search) = &filters.search {
            params.push(format!("%{}%", search));
            where_clause.push_str(&format!(
                " AND (name ILIKE ${0} OR email ILIKE ${0})",
                params.len()
            ));
        }

        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting users");
            AppError::from(e)
        })?;

        let mut data_query = format!("SELECT {USER_COLUMNS} FROM users WHERE 1=1");
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY created_at DESC");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut data_sql = sqlx::query_as::<_, User>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching users");
            AppError::from(e)
        })?;

        let has_more = offset + limit < total;

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    /// Partial profile update keyed by email; untouched fields keep their
    /// stored values.
    #[instrument(skip(db, dto), fields(user.email = %email, db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_profile(
        db: &PgPool,
        email: &str,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = COALESCE($1, name),
                 photo_url = COALESCE($2, photo_url),
                 updated_at = NOW()
             WHERE email = $3
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.photo_url)
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, user.email = %email, "Database error updating profile");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(user.email = %email, "User not found for profile update");
            AppError::not_found(anyhow::anyhow!("User not found"))
        })
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, user.id = %user_id, "Database error deleting user");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        info!(user.id = %user_id, "User deleted");

        Ok(())
    }

    /// Whether the stored role for this email is `admin`. Absent users are
    /// not admins.
    #[instrument(skip(db), fields(user.email = %email, db.operation = "SELECT", db.table = "users"))]
    pub async fn is_admin(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, user.email = %email, "Database error checking role");
                AppError::from(e)
            })?;

        Ok(role.as_deref() == Some(roles::ADMIN))
    }
}

//! Maintenance commands dispatched from the binary's argv.
//!
//! Role changes are deliberately not exposed over HTTP; promoting a user
//! to admin happens here, run by an operator with database access.

use anyhow::{Result, bail};
use sqlx::PgPool;

use crate::modules::users::model::roles;

/// Promotes an existing user to the admin role.
pub async fn grant_admin(pool: &PgPool, email: &str) -> Result<()> {
    let result = sqlx::query("UPDATE users SET role = $1, updated_at = NOW() WHERE email = $2")
        .bind(roles::ADMIN)
        .bind(email)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        bail!("No user found with email {}", email);
    }

    Ok(())
}

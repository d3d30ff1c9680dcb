//! Admin-role authorization.
//!
//! Admin-gated handlers call [`check_admin`] after authentication. The role
//! is read from the users table rather than trusted from the token, so a
//! role change takes effect on the caller's next request even while older
//! tokens are still in circulation.

use sqlx::PgPool;

use carecamp_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;

/// Checks that the authenticated caller's stored role is `admin`.
pub async fn check_admin(db: &PgPool, auth_user: &AuthUser) -> Result<(), AppError> {
    if UserService::is_admin(db, auth_user.email()).await? {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}

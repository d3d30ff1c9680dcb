use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{create_user, delete_user, get_admin_status, get_users, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(get_users))
        .route("/users/admin/{email}", get(get_admin_status))
        .route("/users/{email}", patch(update_profile).delete(delete_user))
}

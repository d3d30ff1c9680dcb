use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{issue_token, logout};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
}

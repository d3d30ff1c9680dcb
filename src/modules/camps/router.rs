use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::state::AppState;

use super::controller::{create_camp, delete_camp, get_camp, get_camps, update_camp};

pub fn init_camps_router() -> Router<AppState> {
    Router::new()
        .route("/camps", get(get_camps).post(create_camp))
        .route("/camps/{id}", get(get_camp))
        .route("/update-camp/{id}", patch(update_camp))
        .route("/delete-camp/{id}", delete(delete_camp))
}

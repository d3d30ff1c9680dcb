use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::state::AppState;

use super::controller::{
    cancel_registration, confirm_registration, create_registration, delete_registration,
    get_registrations, get_user_registration, get_user_registrations,
};

pub fn init_registrations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/registered-camps",
            get(get_registrations).post(create_registration),
        )
        .route("/registered-camps/{id}", patch(confirm_registration))
        .route("/user-registered-camps/{email}", get(get_user_registrations))
        .route("/user-registered-camp/{id}", get(get_user_registration))
        .route("/delete-registration/{id}", delete(delete_registration))
        .route("/cancel-registration/{id}", delete(cancel_registration))
}

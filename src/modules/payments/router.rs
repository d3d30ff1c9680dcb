use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_payment_intent, get_payment_history, record_payment};

pub fn init_payments_router() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payment/{id}", post(record_payment))
        .route("/payment-history/{email}", get(get_payment_history))
}

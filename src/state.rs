use sqlx::PgPool;

use carecamp_config::{CorsConfig, JwtConfig, PaymentsConfig, init_db_pool};

use crate::modules::payments::client::PaymentIntentClient;

/// Long-lived application state, constructed once at startup and shared by
/// every in-flight request. The pool and the payment client are both safe
/// for concurrent use.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub payments: PaymentIntentClient,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        payments: PaymentIntentClient::new(PaymentsConfig::from_env()),
    }
}

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use carecamp::modules::payments::client::PaymentIntentClient;
use carecamp::router::init_router;
use carecamp::state::AppState;
use carecamp_config::{CorsConfig, JwtConfig, PaymentsConfig};

pub async fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        payments: PaymentIntentClient::new(PaymentsConfig::from_env()),
    };
    init_router(state)
}

/// Obtains a session cookie for `email` through `POST /jwt`, returning the
/// `name=value` pair to send back in a `Cookie` header.
#[allow(dead_code)]
pub async fn get_session_cookie(app: Router, email: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/jwt")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "email": email })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("POST /jwt must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();

    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, role: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_camp(pool: &PgPool, name: &str, fees: i64) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO camps (name, image_url, location, scheduled_date, scheduled_time, fees, \
         healthcare_professional, description)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
    )
    .bind(name)
    .bind("https://example.com/camp.png")
    .bind("Test City")
    .bind(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    .bind("10:00 AM")
    .bind(fees)
    .bind("Dr. Test")
    .bind("A test camp")
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn camp_participant_count(pool: &PgPool, camp_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT participant_count FROM camps WHERE id = $1")
        .bind(camp_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn registration_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn registration_status(pool: &PgPool, registration_id: Uuid) -> Option<(String, String)> {
    sqlx::query_as::<_, (String, String)>(
        "SELECT payment_status, confirmation_status FROM registrations WHERE id = $1",
    )
    .bind(registration_id)
    .fetch_optional(pool)
    .await
    .unwrap()
}

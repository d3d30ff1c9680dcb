mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{
    body_json, create_test_camp, create_test_user, generate_unique_email, get_session_cookie,
    registration_status, setup_test_app,
};

async fn register(app: axum::Router, cookie: &str, camp_id: Uuid, email: &str) -> Uuid {
    let request = Request::builder()
        .method("POST")
        .uri("/registered-camps")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(
            serde_json::to_string(&json!({
                "camp_id": camp_id,
                "participant_name": "Pat Participant",
                "participant_email": email
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

fn payment_request(registration_id: Uuid, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/payment/{}", registration_id))
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(
            serde_json::to_string(&json!({ "transaction_id": "pi_test_12345" })).unwrap(),
        ))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_records_minor_units_and_marks_registration_paid(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let cookie = get_session_cookie(app.clone(), &email).await;
    let registration_id = register(app.clone(), &cookie, camp_id, &email).await;

    let (payment_status, _) = registration_status(&pool, registration_id).await.unwrap();
    assert_eq!(payment_status, "Unpaid");

    let response = app
        .oneshot(payment_request(registration_id, &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["amount"], 5000);
    assert_eq!(body["transaction_id"], "pi_test_12345");
    assert_eq!(body["participant_email"], email);

    let (payment_status, _) = registration_status(&pool, registration_id).await.unwrap();
    assert_eq!(payment_status, "Paid");
}

#[sqlx::test(migrations = "./migrations")]
async fn paying_for_someone_elses_registration_is_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let owner_email = generate_unique_email();
    let other_email = generate_unique_email();
    create_test_user(&pool, &owner_email, "user").await;
    create_test_user(&pool, &other_email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let owner_cookie = get_session_cookie(app.clone(), &owner_email).await;
    let registration_id = register(app.clone(), &owner_cookie, camp_id, &owner_email).await;

    let other_cookie = get_session_cookie(app.clone(), &other_email).await;
    let response = app
        .oneshot(payment_request(registration_id, &other_cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let payments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(payments, 0);

    let (payment_status, _) = registration_status(&pool, registration_id).await.unwrap();
    assert_eq!(payment_status, "Unpaid");
}

#[sqlx::test(migrations = "./migrations")]
async fn paying_for_missing_registration_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let cookie = get_session_cookie(app.clone(), &email).await;

    let response = app
        .oneshot(payment_request(Uuid::new_v4(), &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_history_is_self_gated(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let cookie = get_session_cookie(app.clone(), &email).await;
    let registration_id = register(app.clone(), &cookie, camp_id, &email).await;

    let response = app
        .clone()
        .oneshot(payment_request(registration_id, &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/payment-history/{}", email))
        .header(header::COOKIE, cookie.clone())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["amount"], 5000);

    let request = Request::builder()
        .method("GET")
        .uri("/payment-history/other@test.com")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_intent_requires_authentication(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/create-payment-intent")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "registration_id": Uuid::new_v4() })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_intent_is_owner_gated_before_any_provider_call(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let owner_email = generate_unique_email();
    let other_email = generate_unique_email();
    create_test_user(&pool, &owner_email, "user").await;
    create_test_user(&pool, &other_email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let owner_cookie = get_session_cookie(app.clone(), &owner_email).await;
    let registration_id = register(app.clone(), &owner_cookie, camp_id, &owner_email).await;

    let other_cookie = get_session_cookie(app.clone(), &other_email).await;
    let request = Request::builder()
        .method("POST")
        .uri("/create-payment-intent")
        .header("content-type", "application/json")
        .header(header::COOKIE, other_cookie)
        .body(Body::from(
            serde_json::to_string(&json!({ "registration_id": registration_id })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

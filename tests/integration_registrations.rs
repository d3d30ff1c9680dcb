mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{
    body_json, camp_participant_count, create_test_camp, create_test_user, generate_unique_email,
    get_session_cookie, registration_count, setup_test_app,
};

fn registration_body(camp_id: Uuid, email: &str) -> String {
    serde_json::to_string(&json!({
        "camp_id": camp_id,
        "participant_name": "Pat Participant",
        "participant_email": email
    }))
    .unwrap()
}

async fn register(app: axum::Router, cookie: &str, camp_id: Uuid, email: &str) -> Uuid {
    let request = Request::builder()
        .method("POST")
        .uri("/registered-camps")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(registration_body(camp_id, email)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn registration_increments_participant_count(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let cookie = get_session_cookie(app.clone(), &email).await;

    assert_eq!(camp_participant_count(&pool, camp_id).await, 0);

    let request = Request::builder()
        .method("POST")
        .uri("/registered-camps")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(registration_body(camp_id, &email)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["payment_status"], "Unpaid");
    assert_eq!(body["confirmation_status"], "Pending");
    assert_eq!(body["camp_name"], "Eye Care Camp");
    assert_eq!(body["camp_fees"], 50);

    assert_eq!(camp_participant_count(&pool, camp_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn n_registrations_increment_count_by_n(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;

    for _ in 0..3 {
        let email = generate_unique_email();
        create_test_user(&pool, &email, "user").await;
        let cookie = get_session_cookie(app.clone(), &email).await;
        register(app.clone(), &cookie, camp_id, &email).await;
    }

    assert_eq!(camp_participant_count(&pool, camp_id).await, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn registering_with_someone_elses_email_is_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let cookie = get_session_cookie(app.clone(), &email).await;

    let request = Request::builder()
        .method("POST")
        .uri("/registered-camps")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(registration_body(camp_id, "other@test.com")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(registration_count(&pool).await, 0);
    assert_eq!(camp_participant_count(&pool, camp_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn registering_for_missing_camp_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let cookie = get_session_cookie(app.clone(), &email).await;

    let request = Request::builder()
        .method("POST")
        .uri("/registered-camps")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(registration_body(Uuid::new_v4(), &email)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(registration_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_lists_registrations(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "admin").await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let user_cookie = get_session_cookie(app.clone(), &email).await;
    register(app.clone(), &user_cookie, camp_id, &email).await;

    let admin_cookie = get_session_cookie(app.clone(), &admin_email).await;
    let request = Request::builder()
        .method("GET")
        .uri("/registered-camps")
        .header(header::COOKIE, admin_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 1);

    // non-admin is rejected
    let request = Request::builder()
        .method("GET")
        .uri("/registered-camps")
        .header(header::COOKIE, get_session_cookie(app.clone(), &email).await)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_confirms_registration(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "admin").await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let user_cookie = get_session_cookie(app.clone(), &email).await;
    let registration_id = register(app.clone(), &user_cookie, camp_id, &email).await;

    let admin_cookie = get_session_cookie(app.clone(), &admin_email).await;
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/registered-camps/{}", registration_id))
        .header(header::COOKIE, admin_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["confirmation_status"], "Confirmed");

    // participants cannot confirm their own registration
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/registered-camps/{}", registration_id))
        .header(header::COOKIE, user_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn user_lists_own_registrations_only(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let cookie = get_session_cookie(app.clone(), &email).await;
    register(app.clone(), &cookie, camp_id, &email).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/user-registered-camps/{}", email))
        .header(header::COOKIE, cookie.clone())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let request = Request::builder()
        .method("GET")
        .uri("/user-registered-camps/other@test.com")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn single_registration_is_owner_only(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let owner_email = generate_unique_email();
    let other_email = generate_unique_email();
    create_test_user(&pool, &owner_email, "user").await;
    create_test_user(&pool, &other_email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let owner_cookie = get_session_cookie(app.clone(), &owner_email).await;
    let registration_id = register(app.clone(), &owner_cookie, camp_id, &owner_email).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/user-registered-camp/{}", registration_id))
        .header(header::COOKIE, owner_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let other_cookie = get_session_cookie(app.clone(), &other_email).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/user-registered-camp/{}", registration_id))
        .header(header::COOKIE, other_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn owner_cancels_registration_without_decrement(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let cookie = get_session_cookie(app.clone(), &email).await;
    let registration_id = register(app.clone(), &cookie, camp_id, &email).await;
    assert_eq!(camp_participant_count(&pool, camp_id).await, 1);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/cancel-registration/{}", registration_id))
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(registration_count(&pool).await, 0);
    // cancellation does not decrement the camp's participant count
    assert_eq!(camp_participant_count(&pool, camp_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn cancelling_someone_elses_registration_is_forbidden(pool: PgPool) {
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
        .method("DELETE")
        .uri(format!("/cancel-registration/{}", registration_id))
        .header(header::COOKIE, other_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(registration_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn cancelling_missing_registration_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let cookie = get_session_cookie(app.clone(), &email).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/cancel-registration/{}", uuid::Uuid::new_v4()))
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_deletes_registration(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "admin").await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "user").await;
    let camp_id = create_test_camp(&pool, "Eye Care Camp", 50).await;
    let user_cookie = get_session_cookie(app.clone(), &email).await;
    let registration_id = register(app.clone(), &user_cookie, camp_id, &email).await;

    let admin_cookie = get_session_cookie(app.clone(), &admin_email).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/delete-registration/{}", registration_id))
        .header(header::COOKIE, admin_cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(registration_count(&pool).await, 0);
    // deletion does not decrement the camp's participant count
    assert_eq!(camp_participant_count(&pool, camp_id).await, 1);
}

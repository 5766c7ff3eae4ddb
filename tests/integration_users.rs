mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, get_auth_token, setup_test_app};
use http_body_util::BodyExt;
use learnhub::modules::users::model::Role;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri("/api/user/profile")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "student");
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_profile(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("PUT")
        .uri("/api/user/profile")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "first_name": "Updated",
                "last_name": "Name"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["first_name"], "Updated");
    assert_eq!(body["last_name"], "Name");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "oldpass123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "oldpass123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/user/profile/change-password")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "current_password": "oldpass123",
                "new_password": "newpass456"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The new password signs in
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "newpass456").await;
    assert!(!token.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password_wrong_current_rejected(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "oldpass123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "oldpass123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/user/profile/change-password")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "current_password": "not-the-password",
                "new_password": "newpass456"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_users_with_search_and_role_filter(pool: PgPool) {
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", Role::Admin).await;
    create_test_user(&pool, "alice@example.com", "password123", Role::Student).await;
    create_test_user(&pool, "bob@example.com", "password123", Role::Teacher).await;

    let token = get_auth_token(setup_test_app(pool.clone()), &admin_email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri("/api/admin/users?search=alice&role=student")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["email"], "alice@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_promotes_user_to_teacher(pool: PgPool) {
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", Role::Admin).await;
    let student = create_test_user(&pool, &generate_unique_email(), "password123", Role::Student).await;

    let token = get_auth_token(setup_test_app(pool.clone()), &admin_email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/admin/users/{}/role", student.id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({"role": "teacher"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["role"], "teacher");
}

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, get_auth_token, setup_test_app};
use http_body_util::BodyExt;
use learnhub::modules::users::model::Role;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_announcements_are_public(pool: PgPool) {
    sqlx::query("INSERT INTO announcements (title, body) VALUES ('Maintenance', 'Sunday night')")
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri("/api/public/announcements")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Maintenance");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_announcement_lifecycle(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Admin).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/announcements")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "New courses",
                "body": "Three new Rust courses this week"
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/admin/announcements/{}", id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({"title": "Updated title"})).unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/announcements/{}", id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_announcement_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri(format!("/api/public/announcements/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}

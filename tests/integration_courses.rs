mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_course, create_test_user, generate_unique_email, get_auth_token, setup_test_app,
};
use http_body_util::BodyExt;
use learnhub::modules::users::model::Role;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_public_catalog_hides_drafts(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    create_test_course(&pool, teacher.id, "Rust for Beginners", true).await;
    create_test_course(&pool, teacher.id, "Unfinished Draft", false).await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri("/api/public/courses")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Rust for Beginners");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_draft_detail_is_not_found(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    let draft_id = create_test_course(&pool, teacher.id, "Unfinished Draft", false).await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri(format!("/api/public/courses/{}", draft_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_and_list_enrolled(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    let course_id = create_test_course(&pool, teacher.id, "Rust for Beginners", true).await;

    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/student/enrollments")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({"course_id": course_id})).unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri("/api/student/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Rust for Beginners");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_enrollment_rejected(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    let course_id = create_test_course(&pool, teacher.id, "Rust for Beginners", true).await;

    let email = generate_unique_email();
    let student = create_test_user(&pool, &email, "password123", Role::Student).await;
    sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
        .bind(student.id)
        .bind(course_id)
        .execute(&pool)
        .await
        .unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/student/enrollments")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({"course_id": course_id})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_enrollment_body_rejected(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/student/enrollments")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(r#"{"course_id": "not-a-uuid"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unenrolled_course_detail_is_not_found(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    let course_id = create_test_course(&pool, teacher.id, "Rust for Beginners", true).await;

    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Student).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri(format!("/api/student/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolled_course_detail_includes_lessons(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    let course_id = create_test_course(&pool, teacher.id, "Rust for Beginners", true).await;

    sqlx::query(
        "INSERT INTO lessons (course_id, title, body, position)
         VALUES ($1, 'Ownership', 'text', 2), ($1, 'Hello World', 'text', 1)",
    )
    .bind(course_id)
    .execute(&pool)
    .await
    .unwrap();

    let email = generate_unique_email();
    let student = create_test_user(&pool, &email, "password123", Role::Student).await;
    sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
        .bind(student.id)
        .bind(course_id)
        .execute(&pool)
        .await
        .unwrap();

    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .uri(format!("/api/student/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["title"], "Rust for Beginners");

    let lessons: Vec<&str> = body["lessons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(lessons, vec!["Hello World", "Ownership"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_manages_own_lessons(pool: PgPool) {
    let email = generate_unique_email();
    let teacher = create_test_user(&pool, &email, "password123", Role::Teacher).await;
    let course_id = create_test_course(&pool, teacher.id, "Rust for Beginners", true).await;

    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/teacher/courses/{}/lessons", course_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "Hello World",
                "body": "fn main() {}",
                "position": 1
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["title"], "Hello World");
    assert_eq!(body["course_id"], course_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_touch_foreign_course(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), "password123", Role::Teacher).await;
    let course_id = create_test_course(&pool, owner.id, "Not Yours", true).await;

    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Teacher).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/teacher/courses/{}/lessons", course_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({"title": "Sneaky"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    // Another teacher's course reads as missing, not forbidden
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_and_deletes_course(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Admin).await;
    let token = get_auth_token(setup_test_app(pool.clone()), &email, "password123").await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/courses")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "Advanced Rust",
                "description": "Lifetimes and beyond",
                "published": true
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let course_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE id = $1")
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use learnhub::config::cors::CorsConfig;
use learnhub::config::jwt::JwtConfig;
use learnhub::modules::users::model::Role;
use learnhub::router::init_router;
use learnhub::state::AppState;
use learnhub::utils::password::hash_password;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub async fn create_test_user(pool: &PgPool, email: &str, password: &str, role: Role) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (first_name, last_name, email, password, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

#[allow(dead_code)]
pub async fn create_test_course(
    pool: &PgPool,
    teacher_id: Uuid,
    title: &str,
    published: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO courses (title, description, teacher_id, published)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(title)
    .bind(Some("Test course description"))
    .bind(teacher_id)
    .bind(published)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

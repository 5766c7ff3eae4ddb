//! Page handlers for the server-rendered surface.
//!
//! The interesting behavior lives in the access middleware layered over
//! these routes; the handlers themselves render minimal shells that the
//! client-side app hydrates.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

fn shell(title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title} | Learnhub</title></head>\
         <body><div id=\"app\" data-page=\"{title}\"></div></body></html>"
    ))
}

pub async fn home() -> Html<String> {
    shell("Home")
}

pub async fn catalog() -> Html<String> {
    shell("Courses")
}

pub async fn course_detail(Path(id): Path<u64>) -> Html<String> {
    shell(&format!("Course {id}"))
}

pub async fn blog() -> Html<String> {
    shell("Blog")
}

pub async fn announcements() -> Html<String> {
    shell("Announcements")
}

#[derive(Debug, Deserialize)]
pub struct SigninQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

pub async fn signin(Query(query): Query<SigninQuery>) -> Html<String> {
    let _ = query.callback_url;
    shell("Sign in")
}

pub async fn signup() -> Html<String> {
    shell("Sign up")
}

pub async fn student_dashboard() -> Html<String> {
    shell("Dashboard")
}

pub async fn teacher_dashboard() -> Html<String> {
    shell("Teacher")
}

pub async fn admin_dashboard() -> Html<String> {
    shell("Admin")
}

/// Fallback for paths without a dedicated shell. Registered as the page
/// router's fallback so the access middleware still runs for them.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, shell("Not found"))
}

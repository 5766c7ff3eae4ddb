use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::courses::model::{
    Course, CourseWithLessons, CreateCourseDto, CreateLessonDto, EnrollDto, Lesson,
    UpdateCourseDto, UpdateLessonDto,
};
use crate::modules::posts::model::{CreatePostDto, Post, UpdatePostDto};
use crate::modules::tickets::model::{
    CreateTicketDto, LegacyPagination, LegacyTicketsResponse, Ticket, TicketPriority,
    TicketStatus, UpdateTicketStatusDto,
};
use crate::modules::users::model::{
    ChangePasswordDto, Role, UpdateProfileDto, UpdateRoleDto, User,
};
use crate::utils::pagination::ListParams;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::update_user_role,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::enroll,
        crate::modules::courses::controller::my_courses,
        crate::modules::courses::controller::my_course_detail,
        crate::modules::courses::controller::teacher_courses,
        crate::modules::courses::controller::create_lesson,
        crate::modules::courses::controller::update_lesson,
        crate::modules::courses::controller::delete_lesson,
        crate::modules::courses::controller::admin_list_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::announcements::controller::list_announcements,
        crate::modules::announcements::controller::get_announcement,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::update_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::posts::controller::list_posts,
        crate::modules::posts::controller::get_post,
        crate::modules::posts::controller::admin_list_posts,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
        crate::modules::tickets::controller::create_ticket,
        crate::modules::tickets::controller::my_tickets,
        crate::modules::tickets::controller::my_ticket_detail,
        crate::modules::tickets::controller::admin_list_tickets,
        crate::modules::tickets::controller::update_ticket_status,
    ),
    components(
        schemas(
            User,
            Role,
            UpdateProfileDto,
            ChangePasswordDto,
            UpdateRoleDto,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            Course,
            Lesson,
            CourseWithLessons,
            CreateCourseDto,
            UpdateCourseDto,
            CreateLessonDto,
            UpdateLessonDto,
            EnrollDto,
            Announcement,
            CreateAnnouncementDto,
            UpdateAnnouncementDto,
            Post,
            CreatePostDto,
            UpdatePostDto,
            Ticket,
            TicketStatus,
            TicketPriority,
            CreateTicketDto,
            UpdateTicketStatusDto,
            LegacyTicketsResponse,
            LegacyPagination,
            ListParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sign-up and sign-in endpoints"),
        (name = "Users", description = "Profile and user administration"),
        (name = "Courses", description = "Catalog, enrollment and lesson management"),
        (name = "Announcements", description = "Site-wide announcements"),
        (name = "Posts", description = "Blog posts"),
        (name = "Tickets", description = "Support tickets")
    ),
    info(
        title = "Learnhub API",
        version = "0.1.0",
        description = "Learning-management backend built with Rust, Axum, and PostgreSQL featuring JWT-based authentication and role-gated access.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

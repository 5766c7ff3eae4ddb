//! Declarative access policy.
//!
//! One table maps path patterns to a required role class, and one
//! interpreter evaluates it. Both enforcement points share this vocabulary:
//! the page middleware ([`crate::middleware::access`]) turns decisions into
//! redirects, and the API route gates ([`crate::middleware::gate`]) turn the
//! same [`role_satisfies`] check into `UNAUTHORIZED` / `FORBIDDEN` errors.
//!
//! Evaluation order is fixed:
//!
//! 1. Paths whose last segment carries a file extension are allowed
//!    unconditionally (static assets).
//! 2. The first matching table entry determines the required role class.
//! 3. Paths that match nothing require any authenticated identity.

use uuid::Uuid;

use crate::modules::users::model::Role;

/// Authenticated identity resolved once per request.
///
/// Read-only for the rest of the request lifecycle; an absent identity
/// means the request is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

/// Role class a route may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No identity required
    Public,
    /// Any authenticated identity
    Authenticated,
    /// Students only
    Student,
    /// Teachers and admins
    TeacherOrAdmin,
    /// Admins only
    Admin,
}

/// Outcome of the access decision for a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(String),
}

/// How a table entry matches a request path.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// The path is exactly this string
    Exact(&'static str),
    /// The path is this string or extends it at a segment boundary
    Prefix(&'static str),
    /// `/courses/<digits>` course-detail pages
    CourseDetail,
}

impl Matcher {
    fn matches(self, path: &str) -> bool {
        match self {
            Matcher::Exact(p) => path == p,
            Matcher::Prefix(p) => {
                path == p || (path.starts_with(p) && path.as_bytes().get(p.len()) == Some(&b'/'))
            }
            Matcher::CourseDetail => path
                .strip_prefix("/courses/")
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())),
        }
    }
}

/// The policy table. First match wins; order is part of the contract.
const ROUTE_POLICY: &[(Matcher, RouteClass)] = &[
    (Matcher::Exact("/"), RouteClass::Public),
    (Matcher::Exact("/courses"), RouteClass::Public),
    (Matcher::Prefix("/signin"), RouteClass::Public),
    (Matcher::Prefix("/signup"), RouteClass::Public),
    (Matcher::Prefix("/blog"), RouteClass::Public),
    (Matcher::Prefix("/announcements"), RouteClass::Public),
    (Matcher::Prefix("/api/public"), RouteClass::Public),
    (Matcher::Prefix("/api/auth"), RouteClass::Public),
    (Matcher::CourseDetail, RouteClass::Student),
    (Matcher::Prefix("/admin"), RouteClass::Admin),
    (Matcher::Prefix("/api/admin"), RouteClass::Admin),
    (Matcher::Prefix("/teacher"), RouteClass::TeacherOrAdmin),
    (Matcher::Prefix("/api/teacher"), RouteClass::TeacherOrAdmin),
    (Matcher::Prefix("/dashboard"), RouteClass::Student),
    (Matcher::Prefix("/api/student"), RouteClass::Student),
];

/// True if the last path segment carries a file extension marker.
fn has_file_extension(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|seg| seg.contains('.'))
}

/// Maps a request path to its required role class.
pub fn classify(path: &str) -> RouteClass {
    if has_file_extension(path) {
        return RouteClass::Public;
    }

    ROUTE_POLICY
        .iter()
        .find(|(matcher, _)| matcher.matches(path))
        .map(|&(_, class)| class)
        .unwrap_or(RouteClass::Authenticated)
}

/// True if `role` satisfies the required class.
///
/// Used by both the page middleware and the API gates so the two
/// enforcement points cannot drift.
pub fn role_satisfies(class: RouteClass, role: Role) -> bool {
    match class {
        RouteClass::Public => true,
        RouteClass::Authenticated => true,
        RouteClass::Student => role == Role::Student,
        RouteClass::TeacherOrAdmin => role == Role::Teacher || role == Role::Admin,
        RouteClass::Admin => role == Role::Admin,
    }
}

/// Dashboard path a signed-in user of the given role lands on.
pub fn role_home(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Teacher => "/teacher",
        Role::Student => "/dashboard",
    }
}

/// Sign-in path carrying the originally requested path as a callback.
/// The path is percent-encoded so separators like `&` or `#` cannot
/// split the query parameter.
pub fn signin_redirect(original_path: &str) -> String {
    format!("/signin?callbackUrl={}", urlencoding::encode(original_path))
}

/// Combines identity and path classification into an access decision.
///
/// Anonymous requests to non-public paths are sent to sign-in with the
/// original path preserved; authenticated requests with an insufficient
/// role are sent to their own role home.
pub fn decide(identity: Option<&Identity>, path: &str) -> Access {
    let class = classify(path);

    if class == RouteClass::Public {
        return Access::Allow;
    }

    let Some(identity) = identity else {
        return Access::Redirect(signin_redirect(path));
    };

    if role_satisfies(class, identity.role) {
        Access::Allow
    } else {
        Access::Redirect(role_home(identity.role).to_string())
    }
}

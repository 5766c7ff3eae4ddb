use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::policy::Identity;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and provides the caller's
/// claims. Rejects with `UNAUTHORIZED` when the token is missing or invalid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// User id parsed from the token subject.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> crate::modules::users::model::Role {
        self.0.role
    }

    pub fn identity(&self) -> Result<Identity, AppError> {
        Ok(Identity {
            id: self.user_id()?,
            role: self.0.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .or_else(|| cookie_token(&parts.headers))
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Missing credentials")))?;

        let claims = verify_token(&token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Resolves the request identity without failing.
///
/// Expired or malformed credentials yield an anonymous request, never an
/// error; the page middleware turns anonymity into a sign-in redirect.
pub fn resolve_identity(headers: &HeaderMap, jwt_config: &JwtConfig) -> Option<Identity> {
    let token = bearer_token(headers).or_else(|| cookie_token(headers))?;
    let claims = verify_token(&token, jwt_config).ok()?;
    let id = Uuid::parse_str(&claims.sub).ok()?;

    Some(Identity {
        id,
        role: claims.role,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Session cookie used by the page surface.
const SESSION_COOKIE: &str = "session_token";

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::Role;
    use crate::utils::jwt::create_access_token;
    use axum::http::HeaderValue;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_resolve_identity_from_bearer() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "t@example.com", Role::Teacher, &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let identity = resolve_identity(&headers, &config).unwrap();
        assert_eq!(identity.id, user_id);
        assert_eq!(identity.role, Role::Teacher);
    }

    #[test]
    fn test_resolve_identity_from_cookie() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "s@example.com", Role::Student, &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; session_token={}", token)).unwrap(),
        );

        let identity = resolve_identity(&headers, &config).unwrap();
        assert_eq!(identity.role, Role::Student);
    }

    #[test]
    fn test_resolve_identity_invalid_token_is_anonymous() {
        let config = test_config();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-token"),
        );

        assert!(resolve_identity(&headers, &config).is_none());
    }

    #[test]
    fn test_resolve_identity_no_credentials_is_anonymous() {
        assert!(resolve_identity(&HeaderMap::new(), &test_config()).is_none());
    }
}

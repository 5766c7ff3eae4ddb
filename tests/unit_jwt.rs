use learnhub::config::jwt::JwtConfig;
use learnhub::modules::users::model::Role;
use learnhub::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_and_verify_token() {
    let config = test_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "user@test.com", Role::Student, &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "user@test.com");
    assert_eq!(claims.role, Role::Student);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_token_preserves_role() {
    let config = test_config();

    for role in [Role::Student, Role::Teacher, Role::Admin] {
        let token = create_access_token(Uuid::new_v4(), "user@test.com", role, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.role, role);
    }
}

#[test]
fn test_verify_fails_with_wrong_secret() {
    let config = test_config();
    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: 3600,
    };

    let token = create_access_token(Uuid::new_v4(), "user@test.com", Role::Admin, &config).unwrap();
    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn test_verify_fails_on_garbage() {
    let config = test_config();
    assert!(verify_token("not-a-jwt", &config).is_err());
}

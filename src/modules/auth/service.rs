use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::users::model::{Role, User};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let hashed = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, first_name, last_name, email, role, created_at, updated_at",
        )
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(&dto.email)
        .bind(hashed)
        .bind(Role::Student)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "An account with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        // Same error for unknown email and wrong password.
        let credentials = UserService::get_user_by_email(db, &dto.email)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &credentials.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let user = credentials.into_user();
        let access_token = create_access_token(user.id, &user.email, user.role, jwt_config)?;

        Ok(LoginResponse { access_token, user })
    }
}

use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{
    ChangePasswordDto, Role, UpdateProfileDto, User, UserCredentials, UserListParams,
};
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

const USER_COLUMNS: &str = "id, first_name, last_name, email, role, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, first_name, last_name, email, password, role, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user(db, id).await?;
        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET first_name = $1, last_name = $2, updated_at = NOW() \
             WHERE id = $3 RETURNING {USER_COLUMNS}"
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update profile")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        id: Uuid,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let current: Option<String> =
            sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(db)
                .await
                .context("Failed to fetch password hash")
                .map_err(AppError::database)?;

        let current =
            current.ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !verify_password(&dto.current_password, &current)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let hashed = hash_password(&dto.new_password)?;
        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(hashed)
            .bind(id)
            .execute(db)
            .await
            .context("Failed to update password")
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Admin listing: two reads over the same predicate, no transaction.
    /// Count and fetch may observe different snapshots under concurrent
    /// writes; that skew is accepted.
    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        params: &UserListParams,
    ) -> Result<(Vec<User>, i64), AppError> {
        let mut fetch = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        Self::push_filters(&mut fetch, params);
        fetch
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.list.limit())
            .push(" OFFSET ")
            .push_bind(params.list.offset());

        let users = fetch
            .build_query_as::<User>()
            .fetch_all(db)
            .await
            .context("Failed to list users")
            .map_err(AppError::database)?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM users");
        Self::push_filters(&mut count, params);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        Ok((users, total))
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, params: &UserListParams) {
        qb.push(" WHERE TRUE");

        if let Some(search) = params.list.search() {
            let pattern = format!("%{}%", search);
            qb.push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(role) = params.role {
            qb.push(" AND role = ").push_bind(role);
        }
    }

    #[instrument(skip(db))]
    pub async fn update_role(db: &PgPool, id: Uuid, role: Role) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $1, updated_at = NOW() \
             WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(role)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update role")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }
}

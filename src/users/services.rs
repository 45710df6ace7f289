use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::users::{
    dto::{
        CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
        GetUserByEmailRequest, GetUserByIdRequest, GetUserResponse, GetUsersResponse,
        UpdateUserRequest, UpdateUserResponse, UserMessage,
    },
    password::{hash_password, validate_password},
    repo::UserRepository,
    repo_types::{NewUser, UserUpdate},
};

fn parse_oid(raw: &str) -> Result<Uuid, ServiceError> {
    Ok(Uuid::parse_str(raw.trim())?)
}

// Refuse work up front while the liveness loop reports a broken connection.
fn ensure_available(repo: &dyn UserRepository) -> Result<(), ServiceError> {
    let health = repo.health();
    if health.is_healthy() {
        Ok(())
    } else {
        warn!(?health, "user store unhealthy, rejecting request");
        Err(ServiceError::Unavailable)
    }
}

pub async fn create_user(
    repo: &dyn UserRepository,
    req: CreateUserRequest,
) -> Result<CreateUserResponse, ServiceError> {
    async move {
        validate_password(&req.password)?;
        ensure_available(repo)?;

        let password_hash = hash_password(&req.password).map_err(ServiceError::Hashing)?;
        // Identifiers are always minted here; a caller-supplied oid is ignored.
        let user = NewUser {
            oid: Uuid::new_v4(),
            nickname: req.user.nickname,
            email: req.user.email,
            first_name: req.user.first_name,
            last_name: req.user.last_name,
            password_hash,
        };
        repo.create_user(&user).await?;

        info!(user_id = %user.oid, nickname = %user.nickname, "user created");
        Ok::<_, ServiceError>(CreateUserResponse {
            oid: user.oid.to_string(),
        })
    }
    .await
    .inspect_err(|e| warn!(error = %e, "CreateUser failed"))
}

pub async fn get_user_by_email(
    repo: &dyn UserRepository,
    req: GetUserByEmailRequest,
) -> Result<GetUserResponse, ServiceError> {
    async move {
        ensure_available(repo)?;
        let user = repo.get_user_by_email(&req.email).await?;
        Ok::<_, ServiceError>(GetUserResponse {
            user: user.unwrap_or_default().into(),
        })
    }
    .await
    .inspect_err(|e| warn!(error = %e, "GetUserByEmail failed"))
}

pub async fn get_user_by_id(
    repo: &dyn UserRepository,
    req: GetUserByIdRequest,
) -> Result<GetUserResponse, ServiceError> {
    async move {
        let oid = parse_oid(&req.oid)?;
        ensure_available(repo)?;
        let user = repo.get_user_by_id(oid).await?;
        Ok::<_, ServiceError>(GetUserResponse {
            user: user.unwrap_or_default().into(),
        })
    }
    .await
    .inspect_err(|e| warn!(error = %e, "GetUserByID failed"))
}

pub async fn get_users(repo: &dyn UserRepository) -> Result<GetUsersResponse, ServiceError> {
    async move {
        ensure_available(repo)?;
        let users = repo.get_users().await?;
        Ok::<_, ServiceError>(GetUsersResponse {
            users: users.into_iter().map(UserMessage::from).collect(),
        })
    }
    .await
    .inspect_err(|e| warn!(error = %e, "GetUsers failed"))
}

pub async fn update_user(
    repo: &dyn UserRepository,
    req: UpdateUserRequest,
) -> Result<UpdateUserResponse, ServiceError> {
    async move {
        let oid = parse_oid(&req.user.oid)?;
        ensure_available(repo)?;

        let update = UserUpdate {
            oid,
            nickname: req.user.nickname,
            email: req.user.email,
            first_name: req.user.first_name,
            last_name: req.user.last_name,
        };
        let touched = repo.update_user(&update).await?;
        if touched == 0 {
            warn!(user_id = %oid, "UpdateUser matched no user");
        }
        Ok::<_, ServiceError>(UpdateUserResponse { is_ok: touched > 0 })
    }
    .await
    .inspect_err(|e| warn!(error = %e, "UpdateUser failed"))
}

pub async fn delete_user(
    repo: &dyn UserRepository,
    req: DeleteUserRequest,
) -> Result<DeleteUserResponse, ServiceError> {
    async move {
        let oid = parse_oid(&req.oid)?;
        ensure_available(repo)?;
        repo.delete_user(oid).await?;
        Ok::<_, ServiceError>(DeleteUserResponse { is_ok: true })
    }
    .await
    .inspect_err(|e| warn!(error = %e, "DeleteUser failed"))
}

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::{Database, StoreError, StoreHealth};
use crate::users::repo_types::{NewUser, UserInfo, UserRow, UserUpdate};

/// CRUD over the `users` table. Lookups yield `None` when nothing matches.
#[async_trait]
pub trait UserRepository: Send + Sync {
    fn health(&self) -> StoreHealth;
    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError>;
    async fn get_user_by_id(&self, oid: Uuid) -> Result<Option<UserInfo>, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserInfo>, StoreError>;
    async fn get_users(&self) -> Result<Vec<UserInfo>, StoreError>;
    /// Returns the number of rows touched; zero means no such user.
    async fn update_user(&self, update: &UserUpdate) -> Result<u64, StoreError>;
    async fn delete_user(&self, oid: Uuid) -> Result<u64, StoreError>;
}

#[async_trait]
impl UserRepository for Database {
    fn health(&self) -> StoreHealth {
        self.current_health()
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError> {
        let row = UserRow::new_active(user, OffsetDateTime::now_utc());
        sqlx::query(
            r#"
            INSERT INTO users (oid, nickname, email, first_name, last_name, password, created_at, updated_at, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.oid)
        .bind(&row.nickname)
        .bind(&row.email)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.password)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.state)
        .execute(&self.pool().await)
        .await?;
        Ok(())
    }

    async fn get_user_by_id(&self, oid: Uuid) -> Result<Option<UserInfo>, StoreError> {
        let user = sqlx::query_as::<_, UserInfo>(
            r#"
            SELECT oid, nickname, email, first_name, last_name
            FROM users
            WHERE oid = $1
            "#,
        )
        .bind(oid)
        .fetch_optional(&self.pool().await)
        .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserInfo>, StoreError> {
        let user = sqlx::query_as::<_, UserInfo>(
            r#"
            SELECT oid, nickname, email, first_name, last_name
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool().await)
        .await?;
        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<UserInfo>, StoreError> {
        let users = sqlx::query_as::<_, UserInfo>(
            r#"
            SELECT oid, nickname, email, first_name, last_name
            FROM users
            "#,
        )
        .fetch_all(&self.pool().await)
        .await?;
        Ok(users)
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET nickname = $1, email = $2, first_name = $3, last_name = $4, updated_at = $5
            WHERE oid = $6
            "#,
        )
        .bind(&update.nickname)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(OffsetDateTime::now_utc())
        .bind(update.oid)
        .execute(&self.pool().await)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_user(&self, oid: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE oid = $1
            "#,
        )
        .bind(oid)
        .execute(&self.pool().await)
        .await?;
        Ok(result.rows_affected())
    }
}

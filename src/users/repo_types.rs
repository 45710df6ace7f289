use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle state stored in `users.state`. More permissive states compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum UserState {
    Deleted = -1,
    Banned = 0,
    Active = 1,
}

/// Full user row in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub oid: Uuid,
    pub nickname: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password: String,           // Argon2 PHC string, never sent out
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub state: UserState,
}

/// Public-safe projection: no hash, no timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserInfo {
    pub oid: Uuid,
    pub nickname: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRow {
    /// Row for a freshly created user: both timestamps `now`, state Active.
    pub fn new_active(user: &NewUser, now: OffsetDateTime) -> Self {
        Self {
            oid: user.oid,
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
            state: UserState::Active,
        }
    }
}

impl From<UserRow> for UserInfo {
    fn from(r: UserRow) -> Self {
        Self {
            oid: r.oid,
            nickname: r.nickname,
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

/// Insert payload. Timestamps and state are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub oid: Uuid,
    pub nickname: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Mutable display fields of an existing user.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub oid: Uuid,
    pub nickname: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_order_by_permissiveness() {
        assert!(UserState::Deleted < UserState::Banned);
        assert!(UserState::Banned < UserState::Active);
        assert_eq!(UserState::Deleted as i16, -1);
        assert_eq!(UserState::Active as i16, 1);
    }

    #[test]
    fn default_projection_has_nil_oid() {
        let info = UserInfo::default();
        assert!(info.oid.is_nil());
        assert!(info.nickname.is_empty() && info.email.is_empty());
    }

    #[test]
    fn row_serialization_skips_password() {
        let now = OffsetDateTime::now_utc();
        let row = UserRow {
            oid: Uuid::new_v4(),
            nickname: "alice".into(),
            email: "a@x.com".into(),
            first_name: "A".into(),
            last_name: "L".into(),
            password: "$argon2id$secret".into(),
            created_at: now,
            updated_at: now,
            state: UserState::Active,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("alice"));
    }
}

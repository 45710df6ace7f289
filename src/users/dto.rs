use serde::{Deserialize, Serialize};

use crate::users::repo_types::UserInfo;

/// User as carried over the wire. `oid` is the hyphenated UUID string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    #[serde(default)]
    pub oid: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<UserInfo> for UserMessage {
    fn from(u: UserInfo) -> Self {
        Self {
            oid: u.oid.to_string(),
            nickname: u.nickname,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// Absent request fields take their empty value, as in proto3.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub user: UserMessage,
    pub password: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub oid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetUserByEmailRequest {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetUserByIdRequest {
    pub oid: String,
}

/// Response for both point lookups. An unknown user yields the empty projection.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: UserMessage,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUsersResponse {
    pub users: Vec<UserMessage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub user: UserMessage,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub is_ok: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteUserRequest {
    pub oid: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub is_ok: bool,
}

use axum::{
    extract::{FromRequest, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ServiceError,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
            GetUserByEmailRequest, GetUserByIdRequest, GetUserResponse, GetUsersResponse,
            UpdateUserRequest, UpdateUserResponse,
        },
        services,
    },
};

/// JSON mirror of the gRPC service; the bare service path belongs to gRPC.
pub const JSON_PREFIX: &str = "/json/user_service.UserService";

/// `Json` extractor whose rejections answer with a `ServiceError` body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ServiceError))]
pub struct RpcJson<T>(pub T);

pub fn rpc_routes() -> Router<AppState> {
    Router::new()
        .route(&format!("{JSON_PREFIX}/CreateUser"), post(create_user))
        .route(&format!("{JSON_PREFIX}/GetUserByEmail"), post(get_user_by_email))
        .route(&format!("{JSON_PREFIX}/GetUserByID"), post(get_user_by_id))
        .route(&format!("{JSON_PREFIX}/GetUsers"), post(get_users))
        .route(&format!("{JSON_PREFIX}/UpdateUser"), post(update_user))
        .route(&format!("{JSON_PREFIX}/DeleteUser"), post(delete_user))
}

#[instrument(skip(state, payload), fields(nickname = %payload.user.nickname))]
pub async fn create_user(
    State(state): State<AppState>,
    RpcJson(payload): RpcJson<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ServiceError> {
    services::create_user(state.users.as_ref(), payload).await.map(Json)
}

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    RpcJson(payload): RpcJson<GetUserByEmailRequest>,
) -> Result<Json<GetUserResponse>, ServiceError> {
    services::get_user_by_email(state.users.as_ref(), payload).await.map(Json)
}

#[instrument(skip(state, payload), fields(oid = %payload.oid))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    RpcJson(payload): RpcJson<GetUserByIdRequest>,
) -> Result<Json<GetUserResponse>, ServiceError> {
    services::get_user_by_id(state.users.as_ref(), payload).await.map(Json)
}

#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<GetUsersResponse>, ServiceError> {
    services::get_users(state.users.as_ref()).await.map(Json)
}

#[instrument(skip(state, payload), fields(oid = %payload.user.oid))]
pub async fn update_user(
    State(state): State<AppState>,
    RpcJson(payload): RpcJson<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ServiceError> {
    services::update_user(state.users.as_ref(), payload).await.map(Json)
}

#[instrument(skip(state, payload), fields(oid = %payload.oid))]
pub async fn delete_user(
    State(state): State<AppState>,
    RpcJson(payload): RpcJson<DeleteUserRequest>,
) -> Result<Json<DeleteUserResponse>, ServiceError> {
    services::delete_user(state.users.as_ref(), payload).await.map(Json)
}

use std::sync::Arc;

use crate::state::AppState;
use axum::Router;
use tonic::server::NamedService;

pub mod dto;
pub mod grpc;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::rpc_routes())
}

/// gRPC `user_service.UserService` mounted at its canonical path. HTTP/2 only.
pub fn grpc_router(users: Arc<dyn repo::UserRepository>) -> Router {
    let server = grpc::UserGrpc::new(users).into_server();
    let path = format!("/{}/*rpc", grpc::UserServer::NAME);
    Router::new().route_service(&path, server)
}

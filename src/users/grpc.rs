use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::instrument;

use crate::users::{
    dto::{
        CreateUserRequest, DeleteUserRequest, GetUserByEmailRequest, GetUserByIdRequest,
        UpdateUserRequest, UserMessage,
    },
    repo::UserRepository,
    services,
};

pub mod proto {
    tonic::include_proto!("user_service");
}

use proto::user_service_server::{UserService, UserServiceServer};

pub type UserServer = UserServiceServer<UserGrpc>;

/// gRPC face of the user service. Every call goes through `services`.
#[derive(Clone)]
pub struct UserGrpc {
    users: Arc<dyn UserRepository>,
}

impl UserGrpc {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn into_server(self) -> UserServer {
        UserServiceServer::new(self)
    }
}

fn uuid_value(oid: Option<proto::Uuid>) -> String {
    oid.map(|u| u.value).unwrap_or_default()
}

impl From<proto::UserInfo> for UserMessage {
    fn from(u: proto::UserInfo) -> Self {
        Self {
            oid: uuid_value(u.oid),
            nickname: u.nickname,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

impl From<UserMessage> for proto::UserInfo {
    fn from(u: UserMessage) -> Self {
        Self {
            oid: Some(proto::Uuid { value: u.oid }),
            nickname: u.nickname,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

fn user_or_empty(user: Option<proto::UserInfo>) -> UserMessage {
    user.map(UserMessage::from).unwrap_or_default()
}

#[tonic::async_trait]
impl UserService for UserGrpc {
    #[instrument(skip_all)]
    async fn create_user(
        &self,
        request: Request<proto::CreateUserRequest>,
    ) -> Result<Response<proto::CreateUserResponse>, Status> {
        let req = request.into_inner();
        let created = services::create_user(
            self.users.as_ref(),
            CreateUserRequest {
                user: user_or_empty(req.user),
                password: req.password,
            },
        )
        .await?;
        Ok(Response::new(proto::CreateUserResponse {
            oid: Some(proto::Uuid { value: created.oid }),
        }))
    }

    #[instrument(skip_all)]
    async fn get_user_by_email(
        &self,
        request: Request<proto::GetUserByEmailRequest>,
    ) -> Result<Response<proto::GetUserByEmailResponse>, Status> {
        let email = request.into_inner().email;
        let found =
            services::get_user_by_email(self.users.as_ref(), GetUserByEmailRequest { email })
                .await?;
        Ok(Response::new(proto::GetUserByEmailResponse {
            user: Some(found.user.into()),
        }))
    }

    #[instrument(skip_all)]
    async fn get_user_by_id(
        &self,
        request: Request<proto::GetUserByIdRequest>,
    ) -> Result<Response<proto::GetUserByIdResponse>, Status> {
        let oid = uuid_value(request.into_inner().oid);
        let found = services::get_user_by_id(self.users.as_ref(), GetUserByIdRequest { oid }).await?;
        Ok(Response::new(proto::GetUserByIdResponse {
            user: Some(found.user.into()),
        }))
    }

    #[instrument(skip_all)]
    async fn get_users(
        &self,
        _request: Request<()>,
    ) -> Result<Response<proto::GetUsersResponse>, Status> {
        let listed = services::get_users(self.users.as_ref()).await?;
        Ok(Response::new(proto::GetUsersResponse {
            users: listed.users.into_iter().map(proto::UserInfo::from).collect(),
        }))
    }

    #[instrument(skip_all)]
    async fn update_user(
        &self,
        request: Request<proto::UpdateUserRequest>,
    ) -> Result<Response<proto::UpdateUserResponse>, Status> {
        let user = user_or_empty(request.into_inner().user);
        let updated = services::update_user(self.users.as_ref(), UpdateUserRequest { user }).await?;
        Ok(Response::new(proto::UpdateUserResponse {
            is_ok: updated.is_ok,
        }))
    }

    #[instrument(skip_all)]
    async fn delete_user(
        &self,
        request: Request<proto::DeleteUserRequest>,
    ) -> Result<Response<proto::DeleteUserResponse>, Status> {
        let oid = uuid_value(request.into_inner().oid);
        let deleted = services::delete_user(self.users.as_ref(), DeleteUserRequest { oid }).await?;
        Ok(Response::new(proto::DeleteUserResponse {
            is_ok: deleted.is_ok,
        }))
    }
}

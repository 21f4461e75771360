use reqwest::Method;
use shared::{
    domain::{User, UserId},
    protocol::{CreateUserRequest, DataEnvelope, LoginRequest, LoginResponse},
};

use crate::{
    error::ClientResult,
    transport::{IdentityMode, ServiceClient},
};

/// Auth service: signup, login and the user directory.
#[derive(Clone)]
pub struct UsersClient {
    service: ServiceClient,
}

impl UsersClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    /// Raw login call. Most callers want [`crate::SessionStore::login`],
    /// which also records the session.
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<LoginResponse> {
        let request = self
            .service
            .request(Method::POST, "/login", IdentityMode::Omit)
            .json(credentials);
        self.service.send_json(request, "Failed to login").await
    }

    pub async fn create_user(&self, body: &CreateUserRequest) -> ClientResult<User> {
        let request = self
            .service
            .request(Method::POST, "/users", IdentityMode::Omit)
            .json(body);
        self.service
            .send_json::<DataEnvelope<User>>(request, "Failed to create user")
            .await
            .map(DataEnvelope::into_inner)
    }

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let request = self
            .service
            .request(Method::GET, "/users", IdentityMode::Omit);
        self.service
            .send_json::<DataEnvelope<Vec<User>>>(request, "Failed to fetch users")
            .await
            .map(DataEnvelope::into_inner)
    }

    pub async fn get_user(&self, id: UserId) -> ClientResult<User> {
        let request = self
            .service
            .request(Method::GET, &format!("/users/{id}"), IdentityMode::Omit);
        self.service
            .send_json::<DataEnvelope<User>>(request, "Failed to fetch user")
            .await
            .map(DataEnvelope::into_inner)
    }
}

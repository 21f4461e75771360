use serde::{Deserialize, Serialize};

use crate::domain::{HomeId, User};

/// `{ "data": ... }` wrapper every resource service answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// `{ "error": "..." }` body sent with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "adminKey", default, skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHomeRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub home_id: HomeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateObjectRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub room_id: String,
}

/// The object service stores `userId` verbatim as the reservation owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveObjectRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsQuery {
    pub home_id: HomeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectsByRoomQuery {
    pub room_id: String,
}

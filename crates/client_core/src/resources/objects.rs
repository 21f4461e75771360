use reqwest::Method;
use shared::{
    domain::{Object, ObjectId, ObjectKind, UserId},
    protocol::{CreateObjectRequest, DataEnvelope, ObjectsByRoomQuery, ReserveObjectRequest},
};
use tracing::info;

use crate::{
    error::ClientResult,
    transport::{IdentityMode, ServiceClient},
};

#[derive(Clone)]
pub struct ObjectsClient {
    service: ServiceClient,
}

impl ObjectsClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    /// Objects of one room, or every object when `room_id` is `None`.
    pub async fn list_objects(&self, room_id: Option<&str>) -> ClientResult<Vec<Object>> {
        let request = match room_id {
            Some(room_id) => self
                .service
                .request(Method::GET, "/objects/room", IdentityMode::Omit)
                .query(&ObjectsByRoomQuery {
                    room_id: room_id.to_string(),
                }),
            None => self
                .service
                .request(Method::GET, "/objects", IdentityMode::Omit),
        };
        self.service
            .send_json::<DataEnvelope<Vec<Object>>>(request, "Failed to fetch objects")
            .await
            .map(DataEnvelope::into_inner)
    }

    pub async fn list_reserved(&self) -> ClientResult<Vec<Object>> {
        let request = self
            .service
            .request(Method::GET, "/objects/reserved", IdentityMode::Omit);
        self.service
            .send_json::<DataEnvelope<Vec<Object>>>(request, "Failed to fetch reserved objects")
            .await
            .map(DataEnvelope::into_inner)
    }

    pub async fn create_object(
        &self,
        name: &str,
        kind: &ObjectKind,
        room_id: &str,
    ) -> ClientResult<Object> {
        let request = self
            .service
            .request(Method::POST, "/objects", IdentityMode::Attach)
            .json(&CreateObjectRequest {
                name: name.to_string(),
                kind: kind.as_str().to_string(),
                room_id: room_id.to_string(),
            });
        let object = self
            .service
            .send_json::<DataEnvelope<Object>>(request, "Failed to create object")
            .await?
            .into_inner();
        info!(object_id = %object.id, room_id, "object created");
        Ok(object)
    }

    /// Claims an unreserved object for `user`. The service answers 409
    /// when someone already holds it, surfaced as `ClientError::Conflict`.
    pub async fn reserve(
        &self,
        id: &ObjectId,
        room_id: &str,
        user: UserId,
    ) -> ClientResult<Object> {
        let request = self
            .service
            .request(
                Method::PATCH,
                &format!("/objects/{id}/reserve"),
                IdentityMode::Attach,
            )
            .json(&ReserveObjectRequest {
                user_id: user.to_string(),
                room_id: room_id.to_string(),
            });
        let object = self
            .service
            .send_json::<DataEnvelope<Object>>(request, "Failed to reserve object")
            .await?
            .into_inner();
        info!(object_id = %id, user_id = %user, "object reserved");
        Ok(object)
    }

    /// Releases a reservation. Ownership is the service's call.
    pub async fn unreserve(&self, id: &ObjectId) -> ClientResult<Object> {
        let request = self.service.request(
            Method::PATCH,
            &format!("/objects/{id}/unreserve"),
            IdentityMode::Attach,
        );
        let object = self
            .service
            .send_json::<DataEnvelope<Object>>(request, "Failed to unreserve object")
            .await?
            .into_inner();
        info!(object_id = %id, "object unreserved");
        Ok(object)
    }

    pub async fn delete_object(&self, id: &ObjectId) -> ClientResult<()> {
        let request = self.service.request(
            Method::DELETE,
            &format!("/objects/{id}"),
            IdentityMode::Attach,
        );
        self.service
            .send_empty(request, "Failed to delete object")
            .await?;
        info!(object_id = %id, "object deleted");
        Ok(())
    }
}

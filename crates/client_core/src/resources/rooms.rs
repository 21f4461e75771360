use reqwest::Method;
use shared::{
    domain::{HomeId, Room, RoomId},
    protocol::{CreateRoomRequest, DataEnvelope, RoomsQuery},
};
use tracing::info;

use crate::{
    error::ClientResult,
    transport::{IdentityMode, ServiceClient},
};

#[derive(Clone)]
pub struct RoomsClient {
    service: ServiceClient,
}

impl RoomsClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    /// Rooms of one home, or every room when `home_id` is `None`.
    pub async fn list_rooms(&self, home_id: Option<HomeId>) -> ClientResult<Vec<Room>> {
        let mut request = self
            .service
            .request(Method::GET, "/rooms", IdentityMode::Omit);
        if let Some(home_id) = home_id {
            request = request.query(&RoomsQuery { home_id });
        }
        self.service
            .send_json::<DataEnvelope<Vec<Room>>>(request, "Failed to fetch rooms")
            .await
            .map(DataEnvelope::into_inner)
    }

    pub async fn create_room(&self, name: &str, home_id: HomeId) -> ClientResult<Room> {
        let request = self
            .service
            .request(Method::POST, "/rooms", IdentityMode::Attach)
            .json(&CreateRoomRequest {
                name: name.to_string(),
                home_id,
            });
        let room = self
            .service
            .send_json::<DataEnvelope<Room>>(request, "Failed to create room")
            .await?
            .into_inner();
        info!(room_id = %room.id, home_id = %home_id, "room created");
        Ok(room)
    }

    pub async fn delete_room(&self, id: RoomId) -> ClientResult<()> {
        let request = self.service.request(
            Method::DELETE,
            &format!("/rooms/{id}"),
            IdentityMode::Attach,
        );
        self.service
            .send_empty(request, "Failed to delete room")
            .await?;
        info!(room_id = %id, "room deleted");
        Ok(())
    }
}

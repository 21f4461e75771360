use async_trait::async_trait;
use shared::domain::{HomeId, Room, RoomId};

use super::{
    events::{required, ActionOutcome, UiErrorContext},
    list::{ListController, ListState},
    ListView,
};
use crate::{error::ClientResult, Hub};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRow {
    pub room: Room,
    pub can_delete: bool,
}

/// Rooms of a single home.
pub struct RoomsPage {
    hub: Hub,
    home_id: HomeId,
    state: ListState<Room>,
}

impl RoomsPage {
    pub fn new(hub: Hub, home_id: HomeId) -> Self {
        Self {
            hub,
            home_id,
            state: ListState::default(),
        }
    }

    pub async fn mount(hub: Hub, home_id: HomeId) -> Self {
        let mut page = Self::new(hub, home_id);
        page.refresh().await;
        page
    }

    pub fn home_id(&self) -> HomeId {
        self.home_id
    }

    pub async fn create_room(&mut self, name: &str) -> ActionOutcome {
        let name = match required(name, "Room name is required") {
            Ok(name) => name.to_string(),
            Err(err) => {
                self.state.record_failure(&err, UiErrorContext::CreateRoom);
                return ActionOutcome::Failed;
            }
        };
        let result = self.hub.rooms.create_room(&name, self.home_id).await;
        self.settle(result, UiErrorContext::CreateRoom).await
    }

    pub async fn delete_room(&mut self, id: RoomId) -> ActionOutcome {
        let result = self.hub.rooms.delete_room(id).await;
        self.settle(result, UiErrorContext::DeleteRoom).await
    }

    pub fn can_delete(&self) -> bool {
        self.hub.session.is_admin()
    }

    pub fn view(&self) -> ListView<RoomRow> {
        let can_delete = self.can_delete();
        ListView::from_state(
            &self.state,
            |room| RoomRow {
                room: room.clone(),
                can_delete,
            },
            "No rooms added yet.",
        )
    }
}

#[async_trait]
impl ListController for RoomsPage {
    type Item = Room;

    const FETCH_CONTEXT: UiErrorContext = UiErrorContext::LoadRooms;

    fn state(&self) -> &ListState<Room> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ListState<Room> {
        &mut self.state
    }

    async fn fetch(&self) -> ClientResult<Vec<Room>> {
        self.hub.rooms.list_rooms(Some(self.home_id)).await
    }
}

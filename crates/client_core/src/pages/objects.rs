use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use futures::future::join_all;
use shared::domain::{Object, ObjectId, ObjectKind, UserId};
use tracing::warn;

use super::{
    events::{required, ActionOutcome, UiErrorContext},
    list::{ListController, ListState},
    ListView,
};
use crate::{
    config::ReservationOwnership,
    error::{ClientError, ClientResult},
    Hub,
};

const MISSING_ROOM_FOR_CREATE: &str = "Cannot create object: Room ID is missing";
const MISSING_ROOM_FOR_RESERVE: &str = "Cannot reserve object: Room ID is missing";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRow {
    pub object: Object,
    /// Resolved username of the holder, when the lookup has succeeded.
    pub reserved_by_name: Option<String>,
    pub can_reserve: bool,
    pub can_cancel: bool,
    pub can_delete: bool,
}

/// Objects of a room, or of every room when opened without one.
pub struct ObjectsPage {
    hub: Hub,
    room_id: Option<String>,
    state: ListState<Object>,
    show_only_available: bool,
    reserver_names: HashMap<String, String>,
}

impl ObjectsPage {
    pub fn new(hub: Hub, room_id: Option<String>) -> Self {
        Self {
            hub,
            room_id,
            state: ListState::default(),
            show_only_available: false,
            reserver_names: HashMap::new(),
        }
    }

    pub async fn mount(hub: Hub, room_id: Option<String>) -> Self {
        let mut page = Self::new(hub, room_id);
        page.refresh().await;
        page
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn show_only_available(&self) -> bool {
        self.show_only_available
    }

    pub fn set_show_only_available(&mut self, only_available: bool) {
        self.show_only_available = only_available;
    }

    pub async fn create_object(&mut self, name: &str, kind: ObjectKind) -> ActionOutcome {
        let context = UiErrorContext::CreateObject;
        let Some(room_id) = self.room_id.clone() else {
            return self.reject(ClientError::invalid_input(MISSING_ROOM_FOR_CREATE), context);
        };
        let name = match required(name, "Object name is required") {
            Ok(name) => name.to_string(),
            Err(err) => return self.reject(err, context),
        };
        let result = self
            .hub
            .objects
            .create_object(&name, &kind, &room_id)
            .await;
        self.settle(result, context).await
    }

    /// Asks the service to reserve `id` for the signed-in user. Local state
    /// only changes through the refetch that follows a successful answer.
    pub async fn reserve(&mut self, id: &ObjectId) -> ActionOutcome {
        let context = UiErrorContext::Reserve;
        let Some(room_id) = self.room_id.clone() else {
            return self.reject(ClientError::invalid_input(MISSING_ROOM_FOR_RESERVE), context);
        };
        let Some(user_id) = self.hub.session.current_user_id() else {
            return ActionOutcome::LoginRequired;
        };
        let result = self.hub.objects.reserve(id, &room_id, user_id).await;
        self.settle(result, context).await
    }

    pub async fn unreserve(&mut self, id: &ObjectId) -> ActionOutcome {
        let result = self.hub.objects.unreserve(id).await;
        self.settle(result, UiErrorContext::Unreserve).await
    }

    pub async fn delete_object(&mut self, id: &ObjectId) -> ActionOutcome {
        let result = self.hub.objects.delete_object(id).await;
        self.settle(result, UiErrorContext::DeleteObject).await
    }

    pub fn can_delete(&self) -> bool {
        self.hub.session.is_admin()
    }

    /// Whether "Cancel Reservation" is offered for `object`, per the
    /// configured [`ReservationOwnership`] policy.
    pub fn can_cancel(&self, object: &Object) -> bool {
        let Some(reservation) = &object.reservation else {
            return false;
        };
        match self.hub.reservation_ownership {
            ReservationOwnership::UserId => self
                .hub
                .session
                .current_user_id()
                .is_some_and(|id| reservation.reserved_by_user() == Some(id)),
            ReservationOwnership::Username => {
                let holder = self.reserver_names.get(&reservation.reserved_by);
                match (self.hub.session.current_user(), holder) {
                    (Some(user), Some(name)) => user.username == *name,
                    _ => false,
                }
            }
        }
    }

    pub fn reserver_name(&self, reserved_by: &str) -> Option<&str> {
        self.reserver_names.get(reserved_by).map(String::as_str)
    }

    pub fn view(&self) -> ListView<ObjectRow> {
        let can_delete = self.can_delete();
        let empty_message = if self.show_only_available {
            "No available objects found. All objects are currently reserved."
        } else {
            "No objects found. Add your first object!"
        };
        let mut view = ListView::from_state(
            &self.state,
            |object| ObjectRow {
                object: object.clone(),
                reserved_by_name: object
                    .reserved_by()
                    .and_then(|by| self.reserver_name(by))
                    .map(str::to_string),
                can_reserve: !object.is_reserved(),
                can_cancel: self.can_cancel(object),
                can_delete,
            },
            empty_message,
        );
        if self.show_only_available {
            view.retain(|row| !row.object.is_reserved());
        }
        view
    }

    fn reject(&mut self, err: ClientError, context: UiErrorContext) -> ActionOutcome {
        self.state.record_failure(&err, context);
        ActionOutcome::Failed
    }

    /// Looks up usernames for holders not seen before. Failures only cost
    /// the display name.
    async fn resolve_reserver_names(&mut self) {
        let pending: BTreeSet<String> = self
            .state
            .items()
            .iter()
            .filter_map(Object::reserved_by)
            .filter(|by| !self.reserver_names.contains_key(*by))
            .map(str::to_string)
            .collect();
        if pending.is_empty() {
            return;
        }

        let users = &self.hub.users;
        let lookups = pending.into_iter().map(|raw| async move {
            let result = match raw.trim().parse::<u64>() {
                Ok(id) => users.get_user(UserId(id)).await,
                Err(_) => Err(ClientError::invalid_input(format!(
                    "reservation holder '{raw}' is not a user id"
                ))),
            };
            (raw, result)
        });

        for (raw, result) in join_all(lookups).await {
            match result {
                Ok(user) => {
                    self.reserver_names.insert(raw, user.username);
                }
                Err(err) => warn!(reserved_by = %raw, error = %err, "failed to resolve reserver"),
            }
        }
    }
}

#[async_trait]
impl ListController for ObjectsPage {
    type Item = Object;

    const FETCH_CONTEXT: UiErrorContext = UiErrorContext::LoadObjects;

    fn state(&self) -> &ListState<Object> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ListState<Object> {
        &mut self.state
    }

    async fn fetch(&self) -> ClientResult<Vec<Object>> {
        self.hub.objects.list_objects(self.room_id.as_deref()).await
    }

    async fn refresh(&mut self) {
        let result = self.fetch().await;
        let fetched = result.is_ok();
        self.state.apply_fetch(result, Self::FETCH_CONTEXT);
        if fetched {
            self.resolve_reserver_names().await;
        }
    }
}

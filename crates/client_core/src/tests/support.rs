//! In-process stand-in for the four MeubleHub services, all on one port.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{
    domain::{Home, HomeId, Object, ObjectId, ObjectKind, Reservation, Room, RoomId, User, UserId},
    protocol::{
        CreateHomeRequest, CreateObjectRequest, CreateRoomRequest, CreateUserRequest,
        LoginRequest, ObjectsByRoomQuery, ReserveObjectRequest,
    },
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config::{ClientConfig, ReservationOwnership},
    session::SessionStore,
    transport::IDENTITY_HEADER,
    Hub,
};

pub(crate) const ADMIN_KEY: &str = "let-me-in";
pub(crate) const ABSENT: &str = "<absent>";

type Reply = (StatusCode, Json<Value>);
type Shared = Arc<Mutex<MockState>>;

fn ok(data: impl Serialize) -> Reply {
    (StatusCode::OK, Json(json!({ "data": data })))
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

#[derive(Default)]
pub(crate) struct MockState {
    pub users: Vec<(User, String)>,
    pub homes: Vec<Home>,
    pub rooms: Vec<Room>,
    pub objects: Vec<Object>,
    pub next_id: u64,
    /// `(route, X-User-ID value)` for every mutating call.
    pub identity_headers: Vec<(String, String)>,
    pub fail_lists: bool,
    pub list_calls: usize,
}

impl MockState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn record_identity(&mut self, route: &str, headers: &HeaderMap) -> String {
        let value = headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.identity_headers.push((
            route.to_string(),
            value.clone().unwrap_or_else(|| ABSENT.to_string()),
        ));
        value.unwrap_or_default()
    }

    fn require_admin(&self, identity: &str) -> Result<(), Reply> {
        if identity.is_empty() {
            return Err(fail(StatusCode::UNAUTHORIZED, "Authentication required"));
        }
        let is_admin = self
            .users
            .iter()
            .any(|(user, _)| user.id.to_string() == identity && user.is_admin);
        if is_admin {
            Ok(())
        } else {
            Err(fail(StatusCode::FORBIDDEN, "Admin privileges required"))
        }
    }

    fn begin_list(&mut self) -> Result<(), Reply> {
        self.list_calls += 1;
        if self.fail_lists {
            Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"))
        } else {
            Ok(())
        }
    }
}

#[derive(Clone)]
pub(crate) struct MockBackend {
    pub url: String,
    pub state: Shared,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let state: Shared = Arc::new(Mutex::new(MockState {
            next_id: 100,
            ..MockState::default()
        }));

        let app = Router::new()
            .route("/login", post(login))
            .route("/users", post(create_user).get(list_users))
            .route("/users/:id", get(get_user))
            .route("/homes", get(list_homes).post(create_home))
            .route("/homes/:id", delete(delete_home))
            .route("/rooms", get(list_rooms).post(create_room))
            .route("/rooms/:id", delete(delete_room))
            .route("/objects", get(list_objects).post(create_object))
            .route("/objects/room", get(list_objects_by_room))
            .route("/objects/reserved", get(list_reserved))
            .route("/objects/:id", delete(delete_object))
            .route("/objects/:id/reserve", patch(reserve_object))
            .route("/objects/:id/unreserve", patch(unreserve_object))
            .with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            users_url: self.url.clone(),
            homes_url: self.url.clone(),
            rooms_url: self.url.clone(),
            objects_url: self.url.clone(),
            session_path: None,
            reservation_ownership: ReservationOwnership::UserId,
        }
    }

    pub fn hub(&self) -> Hub {
        Hub::with_session(&self.config(), SessionStore::ephemeral())
    }

    pub async fn signed_in_hub(&self, email: &str, password: &str) -> Hub {
        let hub = self.hub();
        hub.session
            .login(&hub.users, email, password)
            .await
            .expect("login");
        hub
    }

    pub async fn add_user(&self, username: &str, password: &str, is_admin: bool) -> User {
        let mut state = self.state.lock().await;
        let user = User {
            id: UserId(state.allocate_id()),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            is_admin,
        };
        state.users.push((user.clone(), password.to_string()));
        user
    }

    pub async fn add_home(&self, name: &str) -> Home {
        let mut state = self.state.lock().await;
        let home = Home {
            id: HomeId(state.allocate_id()),
            name: name.to_string(),
        };
        state.homes.push(home.clone());
        home
    }

    pub async fn add_room(&self, name: &str, home_id: HomeId) -> Room {
        let mut state = self.state.lock().await;
        let room = Room {
            id: RoomId(state.allocate_id()),
            name: name.to_string(),
            home_id,
        };
        state.rooms.push(room.clone());
        room
    }

    pub async fn add_object(
        &self,
        name: &str,
        kind: ObjectKind,
        room_id: &str,
        reserved_by: Option<&str>,
    ) -> Object {
        let mut state = self.state.lock().await;
        let object = Object {
            id: ObjectId(format!("obj-{}", state.allocate_id())),
            name: name.to_string(),
            kind,
            room_id: room_id.to_string(),
            reservation: reserved_by.map(|by| Reservation {
                reserved_by: by.to_string(),
            }),
        };
        state.objects.push(object.clone());
        object
    }

    pub async fn set_fail_lists(&self, fail_lists: bool) {
        self.state.lock().await.fail_lists = fail_lists;
    }

    pub async fn list_calls(&self) -> usize {
        self.state.lock().await.list_calls
    }

    pub async fn identity_headers(&self) -> Vec<(String, String)> {
        self.state.lock().await.identity_headers.clone()
    }

    pub async fn object(&self, id: &ObjectId) -> Option<Object> {
        self.state
            .lock()
            .await
            .objects
            .iter()
            .find(|object| &object.id == id)
            .cloned()
    }
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginRequest>) -> Reply {
    let state = state.lock().await;
    match state
        .users
        .iter()
        .find(|(user, password)| user.email == body.email && *password == body.password)
    {
        Some((user, _)) => (
            StatusCode::OK,
            Json(json!({ "message": "Login successful", "user": user })),
        ),
        None => fail(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn create_user(State(state): State<Shared>, Json(body): Json<CreateUserRequest>) -> Reply {
    let mut state = state.lock().await;
    if state.users.iter().any(|(user, _)| user.email == body.email) {
        return fail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let user = User {
        id: UserId(state.allocate_id()),
        username: body.username,
        email: body.email,
        is_admin: body.admin_key.as_deref() == Some(ADMIN_KEY),
    };
    state.users.push((user.clone(), body.password));
    ok(user)
}

async fn list_users(State(state): State<Shared>) -> Reply {
    let mut state = state.lock().await;
    if let Err(reply) = state.begin_list() {
        return reply;
    }
    let users: Vec<User> = state.users.iter().map(|(user, _)| user.clone()).collect();
    ok(users)
}

async fn get_user(State(state): State<Shared>, Path(id): Path<u64>) -> Reply {
    let state = state.lock().await;
    match state.users.iter().find(|(user, _)| user.id == UserId(id)) {
        Some((user, _)) => ok(user),
        None => fail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn list_homes(State(state): State<Shared>) -> Reply {
    let mut state = state.lock().await;
    if let Err(reply) = state.begin_list() {
        return reply;
    }
    ok(&state.homes)
}

async fn create_home(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateHomeRequest>,
) -> Reply {
    let mut state = state.lock().await;
    state.record_identity("POST /homes", &headers);
    if state.homes.iter().any(|home| home.name == body.name) {
        return fail(StatusCode::BAD_REQUEST, "Home name already exists");
    }
    let home = Home {
        id: HomeId(state.allocate_id()),
        name: body.name,
    };
    state.homes.push(home.clone());
    ok(home)
}

async fn delete_home(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Reply {
    let mut state = state.lock().await;
    let identity = state.record_identity("DELETE /homes", &headers);
    if let Err(reply) = state.require_admin(&identity) {
        return reply;
    }
    state.homes.retain(|home| home.id != HomeId(id));
    (StatusCode::OK, Json(json!({ "message": "Home deleted" })))
}

#[derive(Deserialize)]
struct RoomsFilter {
    home_id: Option<u64>,
}

async fn list_rooms(State(state): State<Shared>, Query(filter): Query<RoomsFilter>) -> Reply {
    let mut state = state.lock().await;
    if let Err(reply) = state.begin_list() {
        return reply;
    }
    let rooms: Vec<Room> = state
        .rooms
        .iter()
        .filter(|room| filter.home_id.map_or(true, |id| room.home_id == HomeId(id)))
        .cloned()
        .collect();
    ok(rooms)
}

async fn create_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateRoomRequest>,
) -> Reply {
    let mut state = state.lock().await;
    state.record_identity("POST /rooms", &headers);
    let room = Room {
        id: RoomId(state.allocate_id()),
        name: body.name,
        home_id: body.home_id,
    };
    state.rooms.push(room.clone());
    ok(room)
}

async fn delete_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Reply {
    let mut state = state.lock().await;
    let identity = state.record_identity("DELETE /rooms", &headers);
    if let Err(reply) = state.require_admin(&identity) {
        return reply;
    }
    state.rooms.retain(|room| room.id != RoomId(id));
    (StatusCode::NO_CONTENT, Json(Value::Null))
}

async fn list_objects(State(state): State<Shared>) -> Reply {
    let mut state = state.lock().await;
    if let Err(reply) = state.begin_list() {
        return reply;
    }
    ok(&state.objects)
}

async fn list_objects_by_room(
    State(state): State<Shared>,
    Query(query): Query<ObjectsByRoomQuery>,
) -> Reply {
    let mut state = state.lock().await;
    if let Err(reply) = state.begin_list() {
        return reply;
    }
    let objects: Vec<Object> = state
        .objects
        .iter()
        .filter(|object| object.room_id == query.room_id)
        .cloned()
        .collect();
    ok(objects)
}

async fn list_reserved(State(state): State<Shared>) -> Reply {
    let mut state = state.lock().await;
    if let Err(reply) = state.begin_list() {
        return reply;
    }
    let objects: Vec<Object> = state
        .objects
        .iter()
        .filter(|object| object.is_reserved())
        .cloned()
        .collect();
    ok(objects)
}

async fn create_object(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateObjectRequest>,
) -> Reply {
    let mut state = state.lock().await;
    state.record_identity("POST /objects", &headers);
    let object = Object {
        id: ObjectId(format!("obj-{}", state.allocate_id())),
        name: body.name,
        kind: ObjectKind::parse(&body.kind),
        room_id: body.room_id,
        reservation: None,
    };
    state.objects.push(object.clone());
    ok(object)
}

async fn reserve_object(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<ReserveObjectRequest>,
) -> Reply {
    let mut state = state.lock().await;
    state.record_identity("PATCH /objects/reserve", &headers);
    let Some(object) = state.objects.iter_mut().find(|object| object.id.0 == id) else {
        return fail(StatusCode::NOT_FOUND, "Object not found");
    };
    if object.is_reserved() {
        return fail(StatusCode::CONFLICT, "Object is already reserved");
    }
    object.reservation = Some(Reservation {
        reserved_by: body.user_id,
    });
    ok(object.clone())
}

async fn unreserve_object(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    let mut state = state.lock().await;
    state.record_identity("PATCH /objects/unreserve", &headers);
    let Some(object) = state.objects.iter_mut().find(|object| object.id.0 == id) else {
        return fail(StatusCode::NOT_FOUND, "Object not found");
    };
    if !object.is_reserved() {
        return fail(StatusCode::BAD_REQUEST, "Object is not reserved");
    }
    object.reservation = None;
    ok(object.clone())
}

async fn delete_object(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    let mut state = state.lock().await;
    let identity = state.record_identity("DELETE /objects", &headers);
    if let Err(reply) = state.require_admin(&identity) {
        return reply;
    }
    state.objects.retain(|object| object.id.0 != id);
    (StatusCode::OK, Json(json!({ "message": "Object deleted" })))
}

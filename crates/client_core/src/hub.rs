use reqwest::Client;

use crate::{
    config::{ClientConfig, ReservationOwnership},
    resources::{HomesClient, ObjectsClient, RoomsClient, UsersClient},
    session::{FileSessionPersistence, SessionStore},
    transport::ServiceClient,
};

/// Everything a page needs: the session plus one client per service.
///
/// Cloning is cheap; all clones share the same HTTP pool and session.
#[derive(Clone)]
pub struct Hub {
    pub session: SessionStore,
    pub users: UsersClient,
    pub homes: HomesClient,
    pub rooms: RoomsClient,
    pub objects: ObjectsClient,
    pub reservation_ownership: ReservationOwnership,
}

impl Hub {
    /// Session persisted at `config.session_path`, or in memory when unset.
    pub fn new(config: &ClientConfig) -> Self {
        let session = match &config.session_path {
            Some(path) => SessionStore::open(FileSessionPersistence::new(path)),
            None => SessionStore::ephemeral(),
        };
        Self::with_session(config, session)
    }

    pub fn with_session(config: &ClientConfig, session: SessionStore) -> Self {
        let http = Client::new();
        let service = |name: &'static str, url: &str| {
            ServiceClient::new(http.clone(), name, url, session.clone())
        };
        Self {
            users: UsersClient::new(service("users", &config.users_url)),
            homes: HomesClient::new(service("homes", &config.homes_url)),
            rooms: RoomsClient::new(service("rooms", &config.rooms_url)),
            objects: ObjectsClient::new(service("objects", &config.objects_url)),
            reservation_ownership: config.reservation_ownership,
            session,
        }
    }
}

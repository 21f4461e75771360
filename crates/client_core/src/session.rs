//! Process-wide record of who is signed in.
//!
//! A [`SessionStore`] is cheap to clone and is handed to every resource
//! client and page controller. Only [`SessionStore::login`] and
//! [`SessionStore::logout`] write to it; everything else reads.

use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{User, UserId},
    protocol::LoginRequest,
};
use tracing::{info, warn};

use crate::{
    error::{ClientError, ClientResult},
    resources::UsersClient,
};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    #[serde(rename = "isAuthenticated")]
    pub authenticated: bool,
}

pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> ClientResult<Option<Session>>;
    fn save(&self, session: &Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Keeps nothing across process restarts.
pub struct EphemeralSession;

impl SessionPersistence for EphemeralSession {
    fn load(&self) -> ClientResult<Option<Session>> {
        Ok(None)
    }

    fn save(&self, _session: &Session) -> ClientResult<()> {
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        Ok(())
    }
}

/// Stores the session as a small JSON document on disk.
pub struct FileSessionPersistence {
    path: PathBuf,
}

impl FileSessionPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionPersistence for FileSessionPersistence {
    fn load(&self) -> ClientResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ClientError::Session(format!(
                    "failed to read '{}': {err}",
                    self.path.display()
                )))
            }
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| ClientError::Session(format!("corrupt session file: {err}")))
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                ClientError::Session(format!(
                    "failed to create session directory '{}': {err}",
                    parent.display()
                ))
            })?;
        }
        let body = serde_json::to_vec_pretty(session)
            .map_err(|err| ClientError::Session(err.to_string()))?;
        fs::write(&self.path, body).map_err(|err| {
            ClientError::Session(format!("failed to write '{}': {err}", self.path.display()))
        })
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::Session(format!(
                "failed to remove '{}': {err}",
                self.path.display()
            ))),
        }
    }
}

struct SessionStoreInner {
    persistence: Box<dyn SessionPersistence>,
    current: RwLock<Option<Session>>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

impl SessionStore {
    pub fn ephemeral() -> Self {
        Self::open(EphemeralSession)
    }

    /// Restores whatever `persistence` holds. An unreadable record is
    /// treated as "signed out".
    pub fn open(persistence: impl SessionPersistence + 'static) -> Self {
        let current = match persistence.load() {
            Ok(session) => session.filter(|session| session.authenticated),
            Err(err) => {
                warn!(error = %err, "discarding unreadable persisted session");
                None
            }
        };
        Self {
            inner: Arc::new(SessionStoreInner {
                persistence: Box::new(persistence),
                current: RwLock::new(current),
            }),
        }
    }

    /// Signs in against the users service. On failure any existing session
    /// is left as it was.
    pub async fn login(
        &self,
        users: &UsersClient,
        email: &str,
        password: &str,
    ) -> ClientResult<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::invalid_input("Email and password are required"));
        }

        let response = users
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(|err| match err {
                ClientError::Unauthorized(_) => {
                    ClientError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
                }
                other => other,
            })?;

        let session = Session {
            user: response.user.clone(),
            authenticated: true,
        };
        if let Err(err) = self.inner.persistence.save(&session) {
            warn!(error = %err, "session kept in memory only");
        }
        *self.write() = Some(session);
        info!(user_id = %response.user.id, "signed in");
        Ok(response.user)
    }

    /// Clears local state. Never talks to a server and never fails.
    pub fn logout(&self) {
        let previous = self.write().take();
        if let Err(err) = self.inner.persistence.clear() {
            warn!(error = %err, "failed to clear persisted session");
        }
        if let Some(session) = previous {
            info!(user_id = %session.user.id, "signed out");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().as_ref().map(|session| session.user.clone())
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.read().as_ref().map(|session| session.user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|session| session.authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|session| session.user.is_admin)
    }

    /// Value for the identity header: the user id, or empty when signed out.
    pub fn identity_header_value(&self) -> String {
        self.current_user_id()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

//! Displayable errors and action outcomes for page controllers.

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Auth,
    Conflict,
    Transport,
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Login,
    Signup,
    LoadHomes,
    CreateHome,
    DeleteHome,
    LoadRooms,
    CreateRoom,
    DeleteRoom,
    LoadObjects,
    CreateObject,
    DeleteObject,
    Reserve,
    Unreserve,
}

/// What an action did, once its error (if any) has been recorded on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Request accepted; the page has re-fetched from the server.
    Done,
    /// Rejected locally or by a service; see the page's error.
    Failed,
    /// No session to act as; the shell should route to login.
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::InvalidInput(_) => UiErrorCategory::Validation,
            ClientError::Unauthorized(_) => UiErrorCategory::Auth,
            ClientError::Conflict(_) => UiErrorCategory::Conflict,
            ClientError::Service { status: None, .. } => UiErrorCategory::Transport,
            ClientError::Service { .. } | ClientError::Session(_) => UiErrorCategory::Service,
        };
        Self::new(category, context, err.to_string())
    }

    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Trims `value`, failing with `message` when nothing is left.
pub(crate) fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, ClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ClientError::invalid_input(message))
    } else {
        Ok(trimmed)
    }
}

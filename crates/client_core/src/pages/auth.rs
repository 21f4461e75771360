use shared::{domain::User, protocol::CreateUserRequest};

use super::events::{required, ActionOutcome, UiError, UiErrorContext};
use crate::{error::ClientError, Hub};

const REGISTER_FALLBACK: &str = "Failed to register. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: Option<UiError>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub async fn submit(&mut self, hub: &Hub) -> ActionOutcome {
        self.error = None;
        match hub
            .session
            .login(&hub.users, &self.email, &self.password)
            .await
        {
            Ok(_) => {
                self.password.clear();
                ActionOutcome::Done
            }
            Err(err) => {
                self.error = Some(UiError::from_client_error(UiErrorContext::Login, &err));
                ActionOutcome::Failed
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub admin_key: Option<String>,
    error: Option<UiError>,
    created: Option<User>,
}

impl SignupForm {
    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub fn created(&self) -> Option<&User> {
        self.created.as_ref()
    }

    /// Registers the account. Does not sign in; the shell routes to login.
    pub async fn submit(&mut self, hub: &Hub) -> ActionOutcome {
        self.error = None;
        let request = match self.validate() {
            Ok(request) => request,
            Err(err) => return self.fail(&err),
        };

        match hub.users.create_user(&request).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "account created");
                self.created = Some(user);
                self.password.clear();
                self.confirm_password.clear();
                ActionOutcome::Done
            }
            Err(ClientError::Service {
                status: Some(400),
                message,
            }) => self.fail(&ClientError::invalid_input(message)),
            Err(err @ (ClientError::Conflict(_) | ClientError::InvalidInput(_))) => self.fail(&err),
            Err(err) => {
                tracing::warn!(error = %err, "signup failed");
                self.fail(&ClientError::Service {
                    status: err.status(),
                    message: REGISTER_FALLBACK.to_string(),
                })
            }
        }
    }

    fn validate(&self) -> Result<CreateUserRequest, ClientError> {
        let username = required(&self.username, "Username is required")?;
        let email = required(&self.email, "Email is required")?;
        if self.password.is_empty() {
            return Err(ClientError::invalid_input("Password is required"));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::invalid_input("Passwords do not match"));
        }
        Ok(CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            admin_key: self
                .admin_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
        })
    }

    fn fail(&mut self, err: &ClientError) -> ActionOutcome {
        self.error = Some(UiError::from_client_error(UiErrorContext::Signup, err));
        ActionOutcome::Failed
    }
}

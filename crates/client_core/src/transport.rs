//! One [`ServiceClient`] per backend base URL: request building, the
//! identity header, and status/error-body mapping.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::protocol::ErrorBody;
use tracing::debug;

use crate::{
    error::{ClientError, ClientResult},
    session::SessionStore,
};

pub const IDENTITY_HEADER: &str = "X-User-ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// Attach `X-User-ID` from the current session (empty when signed out).
    Attach,
    Omit,
}

#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    service: &'static str,
    base_url: String,
    session: SessionStore,
}

impl ServiceClient {
    pub fn new(
        http: Client,
        service: &'static str,
        base_url: impl Into<String>,
        session: SessionStore,
    ) -> Self {
        Self {
            http,
            service,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn request(&self, method: Method, path: &str, identity: IdentityMode) -> RequestBuilder {
        debug!(service = self.service, %method, path, "outbound request");
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match identity {
            IdentityMode::Attach => {
                builder.header(IDENTITY_HEADER, self.session.identity_header_value())
            }
            IdentityMode::Omit => builder,
        }
    }

    /// Sends and decodes a JSON body on success.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> ClientResult<T> {
        let response = self.send(request, fallback).await?;
        response.json::<T>().await.map_err(|err| {
            ClientError::transport(format!("{}: malformed response: {err}", self.service))
        })
    }

    /// Sends and ignores whatever body a successful answer carries.
    pub async fn send_empty(&self, request: RequestBuilder, fallback: &str) -> ClientResult<()> {
        self.send(request, fallback).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|err| {
            debug!(service = self.service, error = %err, "transport failure");
            ClientError::transport(format!("{fallback}: {err}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
        debug!(
            service = self.service,
            status = status.as_u16(),
            %message,
            "service rejected request"
        );
        Err(ClientError::from_status(status.as_u16(), message))
    }
}

/// Extracts `error` from a `{ "error": "..." }` body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

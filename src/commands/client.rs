//! Shared HTTP plumbing for the hosted backend

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use portfolio_engine::repository::Listeners;
use portfolio_engine::{Session, StoreError, StoreResult};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::BackendConfig;

/// Handle to the hosted backend. Implements both `DataStore` and
/// `SessionProvider`; clones share the session.
#[derive(Clone)]
pub struct SupabaseClient {
    pub(super) inner: Rc<ClientInner>,
}

pub(super) struct ClientInner {
    pub(super) base_url: String,
    pub(super) anon_key: String,
    pub(super) redirect_to: Option<String>,
    pub(super) http: reqwest::Client,
    pub(super) session: RefCell<Option<Session>>,
    /// Set once the URL fragment and local storage have been read
    pub(super) restored: Cell<bool>,
    pub(super) listeners: Listeners<Option<Session>>,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                base_url: config.url.trim_end_matches('/').to_string(),
                anon_key: config.anon_key.clone(),
                redirect_to: config.redirect_to.clone(),
                http: reqwest::Client::new(),
                session: RefCell::new(None),
                restored: Cell::new(false),
                listeners: Listeners::new(),
            }),
        }
    }

    pub(super) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.inner.base_url, path)
    }

    pub(super) fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.inner.base_url, path)
    }

    /// Request carrying the project key
    pub(super) fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header("apikey", &self.inner.anon_key)
    }

    /// Request on behalf of the signed-in user
    pub(super) fn authorized(&self, method: Method, url: String, session: &Session) -> RequestBuilder {
        self.request(method, url).bearer_auth(&session.access_token)
    }
}

// ========================
// Responses
// ========================

/// The backend reports failures under one of these keys depending on the
/// service (REST vs auth)
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Send and turn any non-2xx answer into `StoreError::Rejected` carrying the
/// backend's own message
pub(super) async fn send(builder: RequestBuilder) -> StoreResult<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "backend rejected request");
    Err(StoreError::rejected(error_message(status, &body)))
}

pub(super) async fn read_json<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
    response
        .json()
        .await
        .map_err(|e| StoreError::Transport(format!("unreadable response: {e}")))
}

pub(super) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.msg).or(b.error_description).or(b.error))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_text() {
        let rest = r#"{"code":"23502","message":"null value in column \"nom\" violates not-null constraint"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, rest),
            "null value in column \"nom\" violates not-null constraint"
        );

        let auth = r#"{"code":429,"msg":"For security purposes, you can only request this after 60 seconds."}"#;
        assert_eq!(
            error_message(StatusCode::TOO_MANY_REQUESTS, auth),
            "For security purposes, you can only request this after 60 seconds."
        );

        let oauth = r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, oauth), "Invalid Refresh Token");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), "502 Bad Gateway");
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, "{}"), "401 Unauthorized");
    }
}

//! Email-link sign-in and session persistence
//!
//! A sign-in link brings the user back with the tokens in the URL fragment.
//! The resulting session is kept in local storage so a reload stays signed
//! in, and refreshed with its refresh token once expired.

use std::collections::HashMap;

use async_trait::async_trait;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use portfolio_engine::repository::{SessionProvider, Subscription};
use portfolio_engine::{OwnerId, Session, SessionUser, StoreResult};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use super::client::{read_json, send, SupabaseClient};

const SESSION_STORAGE_KEY: &str = "immo-gestion.session";

/// What a sign-in redirect left in the URL fragment
#[derive(Debug, Clone, PartialEq)]
pub enum AuthFragment {
    Tokens {
        access_token: String,
        refresh_token: Option<String>,
        /// Seconds from now
        expires_in: Option<i64>,
    },
    /// The link was refused (expired, already used...)
    Error(String),
}

/// Parse `#access_token=...&refresh_token=...`. `None` when the fragment
/// carries neither tokens nor an error.
pub fn parse_auth_fragment(hash: &str) -> Option<AuthFragment> {
    let params: HashMap<String, String> = hash
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((decode_component(key), decode_component(value)))
        })
        .collect();

    if let Some(error) = params.get("error_description").or_else(|| params.get("error")) {
        return Some(AuthFragment::Error(error.clone()));
    }
    let access_token = params.get("access_token").filter(|t| !t.is_empty())?.clone();
    Some(AuthFragment::Tokens {
        access_token,
        refresh_token: params.get("refresh_token").cloned(),
        expires_in: params.get("expires_in").and_then(|v| v.parse().ok()),
    })
}

/// Email-link request, optionally sending the user back to `redirect_to`
pub(super) fn otp_path(redirect_to: Option<&str>) -> String {
    match redirect_to {
        Some(redirect) => format!(
            "otp?redirect_to={}",
            utf8_percent_encode(redirect, NON_ALPHANUMERIC)
        ),
        None => "otp".to_string(),
    }
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

// ========================
// Wire Structs
// ========================

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct UserResponse {
    id: OwnerId,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        SessionUser { id: user.id, email: user.email }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: UserResponse,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        Session {
            user: self.user.into(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.map(|secs| now + secs),
        }
    }
}

fn now_unix() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

// ========================
// Browser Storage
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_stored_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(error = %err, "discarding unreadable stored session");
            None
        }
    }
}

fn persist_session(session: Option<&Session>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let result = match session.map(serde_json::to_string) {
        Some(Ok(json)) => storage.set_item(SESSION_STORAGE_KEY, &json),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "session not serializable");
            return;
        }
        None => storage.remove_item(SESSION_STORAGE_KEY),
    };
    if let Err(err) = result {
        tracing::warn!(error = ?err, "local storage unavailable");
    }
}

/// Drop the tokens from the address bar without adding a history entry
fn clear_fragment(window: &web_sys::Window) {
    let location = window.location();
    let path = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
    }
}

// ========================
// Session Lifecycle
// ========================

impl SupabaseClient {
    /// First call reads the redirect fragment, then local storage
    async fn restore(&self) {
        if self.inner.restored.replace(true) {
            return;
        }
        let session = match self.session_from_location().await {
            Some(session) => Some(session),
            None => load_stored_session(),
        };
        let session = match session {
            Some(s) if s.is_expired(now_unix()) => self.refresh(&s).await,
            other => other,
        };
        tracing::info!(signed_in = session.is_some(), "session restored");
        self.replace_session(session);
    }

    async fn session_from_location(&self) -> Option<Session> {
        let window = web_sys::window()?;
        let hash = window.location().hash().ok()?;
        match parse_auth_fragment(&hash)? {
            AuthFragment::Error(message) => {
                tracing::warn!(error = %message, "sign-in link refused");
                clear_fragment(&window);
                None
            }
            AuthFragment::Tokens { access_token, refresh_token, expires_in } => {
                clear_fragment(&window);
                let user = match self.fetch_user(&access_token).await {
                    Ok(user) => user,
                    Err(err) => {
                        tracing::warn!(error = %err, "sign-in link tokens rejected");
                        return None;
                    }
                };
                Some(Session {
                    user: user.into(),
                    access_token,
                    refresh_token,
                    expires_at: expires_in.map(|secs| now_unix() + secs),
                })
            }
        }
    }

    async fn fetch_user(&self, access_token: &str) -> StoreResult<UserResponse> {
        let request = self
            .request(Method::GET, self.auth_url("user"))
            .bearer_auth(access_token);
        read_json(send(request).await?).await
    }

    async fn refresh(&self, expired: &Session) -> Option<Session> {
        let refresh_token = expired.refresh_token.as_deref()?;
        let request = self
            .request(Method::POST, self.auth_url("token?grant_type=refresh_token"))
            .json(&RefreshRequest { refresh_token });

        let refreshed = match send(request).await {
            Ok(response) => read_json::<TokenResponse>(response).await,
            Err(err) => Err(err),
        };
        match refreshed {
            Ok(tokens) => {
                tracing::debug!("session refreshed");
                Some(tokens.into_session(now_unix()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "session refresh failed");
                None
            }
        }
    }

    /// Store, persist and announce a session change
    fn replace_session(&self, session: Option<Session>) {
        persist_session(session.as_ref());
        *self.inner.session.borrow_mut() = session.clone();
        self.inner.listeners.emit(&session);
    }
}

#[async_trait(?Send)]
impl SessionProvider for SupabaseClient {
    async fn current_session(&self) -> Option<Session> {
        self.restore().await;
        let current = self.inner.session.borrow().clone();
        match current {
            Some(session) if session.is_expired(now_unix()) => {
                let refreshed = self.refresh(&session).await;
                self.replace_session(refreshed.clone());
                refreshed
            }
            other => other,
        }
    }

    fn subscribe(&self, callback: Box<dyn Fn(Option<Session>)>) -> Subscription {
        self.inner.listeners.subscribe(move |session| callback(session.clone()))
    }

    async fn sign_in_with_email_link(&self, email: &str) -> StoreResult<()> {
        let url = self.auth_url(&otp_path(self.inner.redirect_to.as_deref()));
        let request = self
            .request(Method::POST, url)
            .json(&OtpRequest { email: email.trim(), create_user: true });
        send(request).await?;
        tracing::info!("sign-in link requested");
        Ok(())
    }

    async fn sign_out(&self) {
        let current = self.inner.session.borrow().clone();
        if let Some(session) = current {
            let request = self.authorized(Method::POST, self.auth_url("logout"), &session);
            if let Err(err) = send(request).await {
                tracing::warn!(error = %err, "remote sign-out failed, clearing local session anyway");
            }
        }
        self.replace_session(None);
    }
}

//! Repository Layer - Collaborator Traits
//!
//! The engine owns no persistence and no authentication. It talks to a data
//! store, a session provider, a timer and a notification sink through these
//! interfaces. All futures are `?Send`: the client runs on a single-threaded
//! event loop.

use std::time::Duration;

use async_trait::async_trait;

use super::listeners::Subscription;
use crate::domain::{
    NewProperty, Notification, OwnerId, Property, PropertyId, Session, StoreResult,
};

/// Owner-scoped property storage
#[async_trait(?Send)]
pub trait DataStore {
    /// All properties of `owner`, most recently created first
    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<Property>>;

    /// Persist a new property; the store assigns `id` and `created_at`
    async fn insert(&self, property: &NewProperty) -> StoreResult<Property>;

    async fn delete_by_id(&self, id: &PropertyId) -> StoreResult<()>;
}

/// Passwordless sign-in and session lifecycle
#[async_trait(?Send)]
pub trait SessionProvider {
    async fn current_session(&self) -> Option<Session>;

    /// `callback` fires on every sign-in and sign-out until the returned
    /// subscription is dropped
    fn subscribe(&self, callback: Box<dyn Fn(Option<Session>)>) -> Subscription;

    /// Send a sign-in link to `email`
    async fn sign_in_with_email_link(&self, email: &str) -> StoreResult<()>;

    async fn sign_out(&self);
}

/// Source of simulated latency
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// User-visible notification channel
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

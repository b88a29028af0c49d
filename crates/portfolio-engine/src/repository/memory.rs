//! In-memory collaborators
//!
//! Used by the client's demo mode (no hosted backend configured) and by
//! tests. Behaves like the hosted store: owner-scoped, newest first,
//! ids and timestamps assigned on insert.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::listeners::{Listeners, Subscription};
use super::traits::{DataStore, Notifier, SessionProvider, Timer};
use crate::domain::{
    NewProperty, Notification, OwnerId, Property, PropertyId, Session, SessionUser, StoreError,
    StoreResult,
};

#[derive(Default)]
pub struct InMemoryStore {
    /// (insertion sequence, record)
    rows: RefCell<Vec<(u64, Property)>>,
    next_seq: Cell<u64>,
    insert_failures: RefCell<VecDeque<StoreError>>,
    list_failures: RefCell<VecDeque<StoreError>>,
    delete_failures: RefCell<VecDeque<StoreError>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next insert fail with `error`
    pub fn fail_next_insert(&self, error: StoreError) {
        self.insert_failures.borrow_mut().push_back(error);
    }

    pub fn fail_next_list(&self, error: StoreError) {
        self.list_failures.borrow_mut().push_back(error);
    }

    pub fn fail_next_delete(&self, error: StoreError) {
        self.delete_failures.borrow_mut().push_back(error);
    }

    /// Insert with an explicit creation time, for seeding
    pub fn insert_at(&self, property: &NewProperty, created_at: DateTime<Utc>) -> Property {
        let seq = self.next_seq.get() + 1;
        self.next_seq.set(seq);
        let stored =
            Property::from_new(PropertyId::new(format!("bien-{seq}")), created_at, property.clone());
        self.rows.borrow_mut().push((seq, stored.clone()));
        stored
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait(?Send)]
impl DataStore for InMemoryStore {
    async fn list_by_owner(&self, owner: &OwnerId) -> StoreResult<Vec<Property>> {
        if let Some(err) = self.list_failures.borrow_mut().pop_front() {
            return Err(err);
        }
        let mut owned: Vec<(u64, Property)> = self
            .rows
            .borrow()
            .iter()
            .filter(|(_, p)| &p.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        Ok(owned.into_iter().map(|(_, p)| p).collect())
    }

    async fn insert(&self, property: &NewProperty) -> StoreResult<Property> {
        if let Some(err) = self.insert_failures.borrow_mut().pop_front() {
            return Err(err);
        }
        Ok(self.insert_at(property, Utc::now()))
    }

    async fn delete_by_id(&self, id: &PropertyId) -> StoreResult<()> {
        if let Some(err) = self.delete_failures.borrow_mut().pop_front() {
            return Err(err);
        }
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|(_, p)| &p.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}

/// Session provider whose email link "arrives" instantly
#[derive(Default)]
pub struct LocalSessionProvider {
    session: RefCell<Option<Session>>,
    listeners: Listeners<Option<Session>>,
}

impl LocalSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(owner: &str) -> Self {
        let provider = Self::new();
        *provider.session.borrow_mut() = Some(Self::session_for(owner, None));
        provider
    }

    fn session_for(owner: &str, email: Option<&str>) -> Session {
        Session {
            user: SessionUser {
                id: OwnerId::new(owner),
                email: email.map(str::to_string),
            },
            access_token: format!("local-{owner}"),
            refresh_token: None,
            expires_at: None,
        }
    }

    fn replace(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session.clone();
        self.listeners.emit(&session);
    }
}

#[async_trait(?Send)]
impl SessionProvider for LocalSessionProvider {
    async fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn subscribe(&self, callback: Box<dyn Fn(Option<Session>)>) -> Subscription {
        self.listeners.subscribe(move |session| callback(session.clone()))
    }

    async fn sign_in_with_email_link(&self, email: &str) -> StoreResult<()> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(StoreError::rejected("Unable to validate email address: invalid format"));
        }
        let owner = email.to_lowercase();
        self.replace(Some(Self::session_for(&owner, Some(email))));
        Ok(())
    }

    async fn sign_out(&self) {
        self.replace(None);
    }
}

/// Notifier that keeps everything it was told
#[derive(Default)]
pub struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

/// Timer that never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateTimer;

#[async_trait(?Send)]
impl Timer for ImmediateTimer {
    async fn sleep(&self, _duration: Duration) {}
}

//! Portfolio Engine
//!
//! Holds the fetched properties, the draft form, the current screen and the
//! advisor state, and runs every store/session call the screens need.
//! Observers receive a fresh snapshot after each mutation.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::future::{AbortHandle, Abortable};

use crate::advisor::{compute_recommendation, AdvisorConfig};
use crate::domain::{
    DraftField, DraftForm, EngineError, EngineResult, Notification, OwnerId, Property,
    PropertyId, Recommendation, RecommendationState, Session, StoreError, INCOME_REQUIRED,
    LINK_SENT, PROPERTY_DELETED, PROPERTY_SAVED,
};
use crate::metrics::PortfolioSummary;
use crate::navigation::{Screen, Transition};
use crate::repository::{DataStore, Listeners, Notifier, SessionProvider, Subscription, Timer};

/// Everything the engine talks to
pub struct EngineDeps {
    pub store: Rc<dyn DataStore>,
    pub session: Rc<dyn SessionProvider>,
    pub timer: Rc<dyn Timer>,
    pub notifier: Rc<dyn Notifier>,
    pub advisor: AdvisorConfig,
}

/// Snapshot of what the screens render
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioState {
    /// Most recently created first
    pub properties: Vec<Property>,
    pub draft: DraftForm,
    pub screen: Screen,
    pub recommendation: RecommendationState,
}

impl PortfolioState {
    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_properties(&self.properties, self.draft.annual_income())
    }
}

/// The user's answer to "delete this property?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The store no longer had it
    AlreadyGone,
    Declined,
}

struct Inner {
    store: Rc<dyn DataStore>,
    session: Rc<dyn SessionProvider>,
    timer: Rc<dyn Timer>,
    notifier: Rc<dyn Notifier>,
    advisor: AdvisorConfig,
    state: RefCell<PortfolioState>,
    /// Bumped by navigation and list mutations; fetches carry the value they
    /// started with and are dropped if it moved on.
    generation: Cell<u64>,
    /// Bumped on every sign-out; a write that started under an older epoch
    /// must not touch the state
    session_epoch: Cell<u64>,
    advice_seq: Cell<u64>,
    pending_advice: RefCell<Option<(u64, AbortHandle)>>,
    observers: Listeners<PortfolioState>,
}

/// Cheap-to-clone handle; clones share state
#[derive(Clone)]
pub struct PortfolioEngine {
    inner: Rc<Inner>,
}

impl PortfolioEngine {
    pub fn new(deps: EngineDeps) -> Self {
        Self {
            inner: Rc::new(Inner {
                store: deps.store,
                session: deps.session,
                timer: deps.timer,
                notifier: deps.notifier,
                advisor: deps.advisor,
                state: RefCell::new(PortfolioState::default()),
                generation: Cell::new(0),
                session_epoch: Cell::new(0),
                advice_seq: Cell::new(0),
                pending_advice: RefCell::new(None),
                observers: Listeners::new(),
            }),
        }
    }

    // ========================
    // State access
    // ========================

    pub fn state(&self) -> PortfolioState {
        self.inner.state.borrow().clone()
    }

    pub fn properties(&self) -> Vec<Property> {
        self.inner.state.borrow().properties.clone()
    }

    pub fn draft(&self) -> DraftForm {
        self.inner.state.borrow().draft.clone()
    }

    pub fn screen(&self) -> Screen {
        self.inner.state.borrow().screen
    }

    pub fn recommendation(&self) -> RecommendationState {
        self.inner.state.borrow().recommendation.clone()
    }

    pub fn summary(&self) -> PortfolioSummary {
        self.inner.state.borrow().summary()
    }

    /// Unrounded debt ratio for the declared income
    pub fn debt_ratio(&self) -> f64 {
        self.summary().debt_ratio
    }

    pub fn advisor_config(&self) -> &AdvisorConfig {
        &self.inner.advisor
    }

    pub fn observe(&self, callback: impl Fn(&PortfolioState) + 'static) -> Subscription {
        self.inner.observers.subscribe(callback)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut PortfolioState) -> R) -> R {
        let result = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state)
        };
        let snapshot = self.state();
        self.inner.observers.emit(&snapshot);
        result
    }

    fn next_generation(&self) -> u64 {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        generation
    }

    fn notify(&self, notification: Notification) {
        self.inner.notifier.notify(notification);
    }

    // ========================
    // Draft
    // ========================

    pub fn update_draft(&self, f: impl FnOnce(&mut DraftForm)) {
        self.mutate(|state| f(&mut state.draft));
    }

    pub fn set_draft_field(&self, field: DraftField, value: String) {
        self.update_draft(|draft| draft.set(field, value));
    }

    // ========================
    // Navigation
    // ========================

    fn switch_screen(&self, transition: Transition) -> EngineResult<Screen> {
        let from = self.screen();
        let to = from.apply(transition)?;
        self.next_generation();
        if from == Screen::AdvisorView {
            self.abort_pending_advice();
            self.mutate(|state| state.recommendation = RecommendationState::Idle);
        }
        self.mutate(|state| state.screen = to);
        tracing::debug!(?from, ?to, "screen changed");
        Ok(to)
    }

    /// Move between screens; entering the list or advisor refreshes the
    /// properties.
    pub async fn navigate(&self, transition: Transition) -> EngineResult<Screen> {
        let to = self.switch_screen(transition)?;
        if to.needs_properties() {
            self.load_properties().await;
        }
        Ok(to)
    }

    // ========================
    // Store operations
    // ========================

    async fn owner(&self) -> Option<OwnerId> {
        self.inner.session.current_session().await.map(|s| s.user.id)
    }

    /// Replace the list with the owner's properties, newest first.
    ///
    /// No session or a failing store both yield an empty list; the failure
    /// is only logged. A result that arrives after a newer navigation or list
    /// change is discarded and the current list is returned instead.
    pub async fn load_properties(&self) -> Vec<Property> {
        let ticket = self.next_generation();
        let loaded = match self.owner().await {
            None => Vec::new(),
            Some(owner) => match self.inner.store.list_by_owner(&owner).await {
                Ok(properties) => properties,
                Err(err) => {
                    tracing::warn!(error = %err, owner = %owner, "listing properties failed");
                    Vec::new()
                }
            },
        };

        if self.inner.generation.get() != ticket {
            tracing::debug!(ticket, current = self.inner.generation.get(), "stale property list dropped");
            return self.properties();
        }
        self.mutate(|state| state.properties = loaded.clone());
        loaded
    }

    /// Save the draft as a new property
    pub async fn add_property(&self) -> EngineResult<Property> {
        let Some(owner) = self.owner().await else {
            return Err(EngineError::Unauthenticated);
        };
        let epoch = self.inner.session_epoch.get();
        let payload = self.inner.state.borrow().draft.to_new_property(owner.clone());

        match self.inner.store.insert(&payload).await {
            Ok(created) => {
                if !self.session_still(epoch, &owner).await {
                    tracing::debug!(id = %created.id, owner = %owner, "save finished after the session changed");
                    return Ok(created);
                }
                self.next_generation();
                self.mutate(|state| {
                    state.properties.retain(|p| p.id != created.id);
                    state.properties.insert(0, created.clone());
                    state.draft.reset_keeping_income();
                });
                if self.screen() == Screen::AddForm {
                    self.switch_screen(Transition::Saved)?;
                }
                tracing::info!(id = %created.id, "property saved");
                self.notify(Notification::success(PROPERTY_SAVED));
                Ok(created)
            }
            Err(err) => {
                tracing::warn!(error = %err, "saving property failed");
                self.notify(Notification::error(err.user_message()));
                Err(err.into())
            }
        }
    }

    /// Delete after an explicit yes/no. The local list only changes once the
    /// store has confirmed, by reloading it.
    pub async fn delete_property(
        &self,
        id: &PropertyId,
        confirmation: Confirmation,
    ) -> EngineResult<DeleteOutcome> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Declined);
        }
        if self.owner().await.is_none() {
            return Err(EngineError::Unauthenticated);
        }

        let outcome = match self.inner.store.delete_by_id(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "property deleted");
                self.notify(Notification::success(PROPERTY_DELETED));
                DeleteOutcome::Deleted
            }
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(id = %id, "property already deleted");
                DeleteOutcome::AlreadyGone
            }
            Err(err) => {
                tracing::warn!(error = %err, id = %id, "deleting property failed");
                self.notify(Notification::error(err.user_message()));
                return Err(err.into());
            }
        };
        self.load_properties().await;
        Ok(outcome)
    }

    // ========================
    // Advisor
    // ========================

    fn abort_pending_advice(&self) {
        if let Some((_, handle)) = self.inner.pending_advice.borrow_mut().take() {
            handle.abort();
        }
    }

    /// Run the advisor for the declared income. The result shows up after
    /// the configured latency unless dismissed or superseded first, in which
    /// case this returns `Cancelled` and leaves the state alone.
    pub async fn request_recommendation(&self) -> EngineResult<Recommendation> {
        let (income, summary) = {
            let state = self.inner.state.borrow();
            (state.draft.annual_income(), state.summary())
        };
        let recommendation = match compute_recommendation(
            income,
            summary.debt_ratio,
            summary.aggregates.total_monthly_installments,
            &self.inner.advisor,
        ) {
            Ok(recommendation) => recommendation,
            Err(err) => {
                self.notify(Notification::error(INCOME_REQUIRED));
                return Err(err);
            }
        };

        self.abort_pending_advice();
        let request = self.inner.advice_seq.get() + 1;
        self.inner.advice_seq.set(request);
        let (handle, registration) = AbortHandle::new_pair();
        *self.inner.pending_advice.borrow_mut() = Some((request, handle));
        self.mutate(|state| state.recommendation = RecommendationState::Computing);

        let waited = Abortable::new(self.inner.timer.sleep(self.inner.advisor.latency()), registration)
            .await;

        let still_current =
            matches!(&*self.inner.pending_advice.borrow(), Some((id, _)) if *id == request);
        if !still_current || waited.is_err() {
            return Err(EngineError::Cancelled);
        }
        self.inner.pending_advice.borrow_mut().take();

        tracing::debug!(tier = ?recommendation.tier, "recommendation ready");
        self.mutate(|state| state.recommendation = RecommendationState::Ready(recommendation.clone()));
        Ok(recommendation)
    }

    /// Close the advisor modal, cancelling a computation still in flight
    pub fn dismiss_recommendation(&self) {
        self.abort_pending_advice();
        self.mutate(|state| state.recommendation = RecommendationState::Idle);
    }

    // ========================
    // Session
    // ========================

    pub async fn current_session(&self) -> Option<Session> {
        self.inner.session.current_session().await
    }

    /// Forward session changes to `callback`, clearing portfolio state on
    /// sign-out first
    pub fn watch_session(&self, callback: impl Fn(Option<Session>) + 'static) -> Subscription {
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        self.inner.session.subscribe(Box::new(move |session| {
            if session.is_none() {
                if let Some(inner) = weak.upgrade() {
                    PortfolioEngine { inner }.clear_session_state();
                }
            }
            callback(session);
        }))
    }

    pub async fn sign_in(&self, email: &str) -> EngineResult<()> {
        match self.inner.session.sign_in_with_email_link(email).await {
            Ok(()) => {
                self.notify(Notification::success(LINK_SENT));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-in link request failed");
                self.notify(Notification::error(err.user_message()));
                Err(err.into())
            }
        }
    }

    pub async fn sign_out(&self) {
        self.inner.session.sign_out().await;
        self.clear_session_state();
    }

    /// Same sign-in as when an operation started, and same owner
    async fn session_still(&self, epoch: u64, owner: &OwnerId) -> bool {
        self.inner.session_epoch.get() == epoch && self.owner().await.as_ref() == Some(owner)
    }

    fn clear_session_state(&self) {
        self.inner.session_epoch.set(self.inner.session_epoch.get() + 1);
        self.next_generation();
        self.abort_pending_advice();
        self.mutate(|state| *state = PortfolioState::default());
    }
}

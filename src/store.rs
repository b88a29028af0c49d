//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The engine owns
//! the portfolio state; this store mirrors its snapshots for rendering and
//! adds what only the UI cares about (session gate, toast).

use leptos::prelude::*;
use portfolio_engine::{
    DraftForm, Notification, PortfolioState, Property, RecommendationState, Screen, Session,
};
use reactive_stores::Store;

/// The toast currently on screen
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    /// Lets an expiring timer tell whether it still owns the slot
    pub id: u64,
    pub notification: Notification,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub session: Option<Session>,
    /// False until the first session lookup has answered
    pub session_loaded: bool,
    pub demo_mode: bool,
    /// Most recently created first
    pub properties: Vec<Property>,
    pub draft: DraftForm,
    pub screen: Screen,
    pub recommendation: RecommendationState,
    pub toast: Option<Toast>,
}

impl AppState {
    pub fn new(demo_mode: bool) -> Self {
        Self {
            demo_mode,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Copy an engine snapshot into the store, touching only fields that changed
pub fn store_sync_portfolio(store: &AppStore, state: &PortfolioState) {
    if store.properties().with_untracked(|p| p != &state.properties) {
        store.properties().set(state.properties.clone());
    }
    if store.draft().with_untracked(|d| d != &state.draft) {
        store.draft().set(state.draft.clone());
    }
    if store.screen().get_untracked() != state.screen {
        store.screen().set(state.screen);
    }
    if store.recommendation().with_untracked(|r| r != &state.recommendation) {
        store.recommendation().set(state.recommendation.clone());
    }
}

/// Record the session and open the gate
pub fn store_set_session(store: &AppStore, session: Option<Session>) {
    store.session().set(session);
    store.session_loaded().set(true);
}

//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portfolio_engine::{DraftField, DraftForm, PortfolioEngine, Transition};

use crate::store::AppStore;

/// Engine handle and store, provided once by `App`
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The engine is `Rc`-based, so it lives in local storage
    engine: StoredValue<PortfolioEngine, LocalStorage>,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(engine: PortfolioEngine, store: AppStore) -> Self {
        Self {
            engine: StoredValue::new_local(engine),
            store,
        }
    }

    pub fn engine(&self) -> PortfolioEngine {
        self.engine.get_value()
    }

    /// Switch screens in the background
    pub fn navigate(&self, transition: Transition) {
        let engine = self.engine();
        spawn_local(async move {
            if let Err(err) = engine.navigate(transition).await {
                tracing::warn!(error = %err, ?transition, "navigation refused");
            }
        });
    }

    pub fn set_field(&self, field: DraftField, value: String) {
        self.engine().set_draft_field(field, value);
    }

    pub fn update_draft(&self, f: impl FnOnce(&mut DraftForm)) {
        self.engine().update_draft(f);
    }

    /// Start an advisor run; the modal follows the store
    pub fn request_recommendation(&self) {
        let engine = self.engine();
        spawn_local(async move {
            let _ = engine.request_recommendation().await;
        });
    }

    pub fn dismiss_recommendation(&self) {
        self.engine().dismiss_recommendation();
    }
}

/// Get the app context
pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

//! ImmoGestion Frontend App
//!
//! Wires the engine to its collaborators, mirrors it into the store and
//! gates the dashboard behind a session.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use portfolio_engine::repository::{DataStore, InMemoryStore, LocalSessionProvider, SessionProvider};
use portfolio_engine::{EngineDeps, PortfolioEngine};
use reactive_stores::Store;

use crate::commands::SupabaseClient;
use crate::components::{Dashboard, LoginCard, RecommendationModal, ToastView};
use crate::config::{AppConfig, BackendMode};
use crate::context::AppContext;
use crate::platform::{GlooTimer, ToastNotifier};
use crate::store::{store_set_session, store_sync_portfolio, AppState, AppStateStoreFields, AppStore};

fn build_engine(config: &AppConfig, store: AppStore) -> PortfolioEngine {
    let (data, session): (Rc<dyn DataStore>, Rc<dyn SessionProvider>) = match &config.backend {
        BackendMode::Hosted(backend) => {
            tracing::info!(url = %backend.url, "using hosted backend");
            let client = SupabaseClient::new(backend);
            (Rc::new(client.clone()), Rc::new(client))
        }
        BackendMode::Demo => {
            tracing::info!("no backend configured, running in demo mode");
            (Rc::new(InMemoryStore::new()), Rc::new(LocalSessionProvider::new()))
        }
    };

    PortfolioEngine::new(EngineDeps {
        store: data,
        session,
        timer: Rc::new(GlooTimer),
        notifier: Rc::new(ToastNotifier::new(store, config.toast_ms)),
        advisor: config.advisor.clone(),
    })
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "invalid configuration, falling back to demo mode");
        AppConfig::default()
    });

    let store = Store::new(AppState::new(config.is_demo()));
    let engine = build_engine(&config, store);

    // Both live as long as the page
    engine.observe(move |state| store_sync_portfolio(&store, state)).detach();
    engine.watch_session(move |session| store_set_session(&store, session)).detach();

    {
        let engine = engine.clone();
        spawn_local(async move {
            let session = engine.current_session().await;
            store_set_session(&store, session);
        });
    }

    provide_context(AppContext::new(engine, store));

    let session_loaded = store.session_loaded();
    let signed_in = move || store.session().with(|s| s.is_some());

    view! {
        <div class="app-wrapper">
            <ToastView />
            <RecommendationModal />
            <div class="main-card">
                {move || {
                    if !session_loaded.get() {
                        view! { <div class="center-page"><div class="spinner"></div></div> }.into_any()
                    } else if signed_in() {
                        view! { <Dashboard /> }.into_any()
                    } else {
                        view! { <LoginCard /> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

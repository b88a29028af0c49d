//! Dashboard Component
//!
//! Signed-in shell: disclaimer, header with sign-out, and the current screen.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portfolio_engine::Screen;

use crate::components::{AdvisorView, LogPanel, MainMenu, PropertyForm, PropertyList};
use crate::context::use_app;
use crate::store::AppStateStoreFields;

#[component]
pub fn Dashboard() -> impl IntoView {
    let app = use_app();
    let screen = app.store.screen();
    let session = app.store.session();

    let sign_out = move |_| {
        let engine = app.engine();
        spawn_local(async move {
            engine.sign_out().await;
        });
    };

    view! {
        <div class="dashboard">
            <div class="disclaimer">
                <span class="disclaimer-icon">"⚠"</span>
                <span>
                    "Outil de simulation : les chiffres et recommandations affichés ne constituent pas un conseil en investissement."
                </span>
            </div>

            <header class="dashboard-header">
                <div>
                    <h2>"Dashboard"</h2>
                    <span class="user-email">
                        {move || session.with(|s| {
                            s.as_ref().and_then(|s| s.user.email.clone()).unwrap_or_default()
                        })}
                    </span>
                </div>
                <button class="logout-btn" title="Se déconnecter" on:click=sign_out>
                    "⎋"
                </button>
            </header>

            {move || match screen.get() {
                Screen::Menu => view! { <MainMenu /> }.into_any(),
                Screen::AddForm => view! { <PropertyForm /> }.into_any(),
                Screen::ListView => view! { <PropertyList /> }.into_any(),
                Screen::AdvisorView => view! { <AdvisorView /> }.into_any(),
            }}

            <LogPanel />
        </div>
    }
}

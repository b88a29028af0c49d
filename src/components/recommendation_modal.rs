//! Recommendation Modal Component
//!
//! Spinner while the advisor runs, then the result. Clicking the backdrop
//! or the close button dismisses it, cancelling a run still in progress.

use leptos::prelude::*;
use portfolio_engine::{RecommendationState, Tier};

use crate::context::use_app;
use crate::format::format_amount;
use crate::store::AppStateStoreFields;

#[component]
pub fn RecommendationModal() -> impl IntoView {
    let app = use_app();
    let recommendation = app.store.recommendation();

    move || match recommendation.get() {
        RecommendationState::Idle => ().into_any(),
        RecommendationState::Computing => view! {
            <div class="custom-modal" on:click=move |_| app.dismiss_recommendation()>
                <div class="modal-content loading">
                    <div class="spinner"></div>
                    <b>"Analyse de votre patrimoine..."</b>
                    <span>"Endettement, revenus, capacité résiduelle"</span>
                </div>
            </div>
        }
        .into_any(),
        RecommendationState::Ready(result) => {
            let tier_class = match result.tier {
                Tier::Premium => "tier-badge premium",
                Tier::Restricted => "tier-badge restricted",
            };
            view! {
                <div class="custom-modal" on:click=move |_| app.dismiss_recommendation()>
                    <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                        <span class=tier_class>{result.tier.label()}</span>
                        <p class="advice">{result.advice.clone()}</p>
                        <div class="headroom">
                            <span class="metric-label">"RESTE À EMPRUNTER"</span>
                            <b>{format!("{} € / mois", format_amount(result.borrowing_headroom))}</b>
                        </div>
                        <button class="main-btn" on:click=move |_| app.dismiss_recommendation()>
                            "Fermer"
                        </button>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

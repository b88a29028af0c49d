//! Property List Component
//!
//! Portfolio summary followed by one card per property, newest first.

use leptos::prelude::*;
use portfolio_engine::PortfolioSummary;

use crate::components::{BackButton, PropertyCard};
use crate::context::use_app;
use crate::format::format_amount;
use crate::store::AppStateStoreFields;

#[component]
pub fn PropertyList() -> impl IntoView {
    let app = use_app();
    let properties = app.store.properties();

    // Income plays no part in net worth or debt
    let summary = Memo::new(move |_| properties.with(|p| PortfolioSummary::from_properties(p, 0.0)));

    view! {
        <div class="form-wrapper">
            <BackButton label="Menu" />

            <div class="summary-card">
                <div class="summary-item">
                    <span class="summary-label">"Patrimoine net"</span>
                    <span class="summary-value">
                        {move || format!("{} €", format_amount(summary.with(|s| s.net_worth)))}
                    </span>
                </div>
                <div class="summary-item">
                    <span class="summary-label">"Dette restante"</span>
                    <span class="summary-value debt">
                        {move || format!("{} €", format_amount(summary.with(|s| s.aggregates.total_debt)))}
                    </span>
                </div>
            </div>

            <Show
                when=move || properties.with(|p| !p.is_empty())
                fallback=|| view! { <p class="empty-state">"Aucun bien pour le moment."</p> }
            >
                <div class="property-list">
                    <For
                        each=move || properties.get()
                        key=|property| property.id.clone()
                        children=move |property| view! { <PropertyCard property=property /> }
                    />
                </div>
            </Show>
        </div>
    }
}

use leptos::prelude::*;
use leptos::task::spawn_local;
use portfolio_engine::{compute_cashflow, compute_yield, round1, Confirmation, Property};

use crate::components::DeleteConfirmButton;
use crate::context::use_app;
use crate::format::{format_percent, format_signed_amount};

/// One property with its gross yield and monthly cashflow
#[component]
pub fn PropertyCard(property: Property) -> impl IntoView {
    let app = use_app();
    let gross_yield = round1(compute_yield(&property));
    let cashflow = compute_cashflow(&property);
    let cashflow_class = if cashflow >= 0.0 { "badge positive" } else { "badge negative" };
    let location = if property.surface_m2 > 0.0 {
        format!("{} · {} m²", property.city, property.surface_m2)
    } else {
        property.city.clone()
    };

    let id = property.id.clone();
    let on_decision = Callback::new(move |decision: Confirmation| {
        let engine = app.engine();
        let id = id.clone();
        spawn_local(async move {
            if let Err(err) = engine.delete_property(&id, decision).await {
                tracing::debug!(error = %err, id = %id, "delete did not go through");
            }
        });
    });

    view! {
        <div class="card property-card">
            <div class="property-head">
                <div>
                    <b class="property-name">{property.name.clone()}</b>
                    <span class="property-city">{location}</span>
                </div>
                <DeleteConfirmButton button_class="btn-delete" on_decision=on_decision />
            </div>
            <div class="property-badges">
                <span class="badge">{format!("Rendement {} %", format_percent(gross_yield))}</span>
                <span class=cashflow_class>{format!("{} €/mois", format_signed_amount(cashflow))}</span>
                {property.has_loan.then(|| view! { <span class="badge loan">"Crédit"</span> })}
            </div>
        </div>
    }
}

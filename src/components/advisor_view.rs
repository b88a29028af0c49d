//! Advisor View Component
//!
//! Income entry, debt metrics and the button that starts an analysis.

use leptos::prelude::*;
use portfolio_engine::{DraftField, PortfolioSummary};

use crate::components::{BackButton, DraftInput, Tooltip};
use crate::context::use_app;
use crate::format::{format_amount, format_percent, format_signed_amount};
use crate::store::AppStateStoreFields;

#[component]
pub fn AdvisorView() -> impl IntoView {
    let app = use_app();
    let properties = app.store.properties();
    let draft = app.store.draft();

    let summary = Memo::new(move |_| {
        let income = draft.with(|d| d.annual_income());
        properties.with(|p| PortfolioSummary::from_properties(p, income))
    });
    let analyse = Callback::new(move |_: ()| app.request_recommendation());

    view! {
        <div class="form-wrapper">
            <BackButton label="Menu" />

            <div class="card income-card">
                <DraftInput
                    field=DraftField::AnnualIncome
                    label="Revenus annuels bruts (€)"
                    placeholder="Ex: 50000"
                    tooltip="Revenus du foyer avant impôt. Ils ne sont jamais enregistrés."
                    numeric=true
                    on_enter=analyse
                />
            </div>

            <div class="metric-grid">
                <div class="card metric">
                    <div class="metric-label">
                        "ENDETTEMENT"
                        <Tooltip text="Mensualités rapportées aux revenus mensuels. Seuil bancaire usuel : 35 %." />
                    </div>
                    <div class=move || {
                        if summary.with(|s| s.over_ceiling()) { "metric-value danger" } else { "metric-value ok" }
                    }>
                        {move || format!("{} %", format_percent(summary.with(|s| s.debt_ratio_display())))}
                    </div>
                </div>
                <div class="card metric">
                    <div class="metric-label">"LOYERS MENSUELS"</div>
                    <div class="metric-value">
                        {move || format!("{} €", format_amount(summary.with(|s| s.aggregates.total_monthly_rent)))}
                    </div>
                </div>
            </div>

            <div class="card health">
                <b>"Santé financière"</b>
                <p>
                    "Cashflow net total : "
                    <b>{move || format!("{} €/mois", format_signed_amount(summary.with(|s| s.net_monthly_cashflow)))}</b>
                    ". "
                    {move || {
                        if summary.with(|s| s.has_borrowing_margin()) {
                            "Il vous reste de la marge pour emprunter."
                        } else {
                            "Votre capacité d'emprunt est saturée."
                        }
                    }}
                </p>
            </div>

            <button class="main-btn advisor-btn" on:click=move |_| analyse.run(())>
                "Lancer l'analyse"
            </button>
        </div>
    }
}

//! Property Form Component
//!
//! Entry form for a new property. Rent and loan blocks only show when the
//! matching toggle is on.

use leptos::prelude::*;
use leptos::task::spawn_local;
use portfolio_engine::DraftField;

use crate::components::{BackButton, DraftInput};
use crate::context::use_app;
use crate::store::AppStateStoreFields;

#[component]
pub fn PropertyForm() -> impl IntoView {
    let app = use_app();
    let draft = app.store.draft();
    let (saving, set_saving) = signal(false);

    let save = move |_| {
        let engine = app.engine();
        set_saving.set(true);
        spawn_local(async move {
            // The engine reports the outcome and leaves the form on success
            let _ = engine.add_property().await;
            set_saving.set(false);
        });
    };

    view! {
        <div class="form-wrapper">
            <BackButton label="Retour" />
            <h3 class="section-title">"Nouveau bien"</h3>

            <div class="card">
                <DraftInput field=DraftField::Name label="Nom du bien" placeholder="Ex: T2 Centre-ville" />
                <div class="field-row">
                    <DraftInput field=DraftField::City label="Ville" placeholder="Ex: Lyon" />
                    <DraftInput
                        field=DraftField::Surface
                        label="Surface (m²)"
                        placeholder="45"
                        numeric=true
                    />
                </div>
                <DraftInput
                    field=DraftField::Price
                    label="Prix d'achat (€)"
                    placeholder="Ex: 180000"
                    tooltip="Prix payé frais de notaire inclus. Sert au calcul du rendement brut."
                    numeric=true
                />
            </div>

            <div class="card">
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.is_rented)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            app.update_draft(|d| d.is_rented = checked);
                        }
                    />
                    "Bien loué"
                </label>
                <Show when=move || draft.with(|d| d.is_rented)>
                    <div class="field-row">
                        <DraftInput
                            field=DraftField::Rent
                            label="Loyer mensuel (€)"
                            placeholder="Ex: 750"
                            tooltip="Loyer hors charges encaissé chaque mois."
                            numeric=true
                        />
                        <DraftInput
                            field=DraftField::Charges
                            label="Charges mensuelles (€)"
                            placeholder="Ex: 80"
                            tooltip="Copropriété, taxe foncière lissée, assurance PNO."
                            numeric=true
                        />
                    </div>
                </Show>
            </div>

            <div class="card">
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.has_loan)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            app.update_draft(|d| d.has_loan = checked);
                        }
                    />
                    "Financé à crédit"
                </label>
                <Show when=move || draft.with(|d| d.has_loan)>
                    <DraftInput
                        field=DraftField::LoanPrincipal
                        label="Montant emprunté (€)"
                        placeholder="Ex: 150000"
                        numeric=true
                    />
                    <div class="field-row">
                        <DraftInput
                            field=DraftField::Installment
                            label="Mensualité (€)"
                            placeholder="Ex: 820"
                            tooltip="Mensualité assurance comprise. Entre dans le taux d'endettement."
                            numeric=true
                        />
                        <DraftInput
                            field=DraftField::Repaid
                            label="Déjà remboursé (€)"
                            placeholder="Ex: 12000"
                            tooltip="Capital déjà amorti. Le reste dû en découle."
                            numeric=true
                        />
                    </div>
                </Show>
            </div>

            <button class="main-btn" on:click=save disabled=move || saving.get()>
                "Enregistrer le bien"
            </button>
        </div>
    }
}

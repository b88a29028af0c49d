//! Delete Confirm Button Component
//!
//! Inline yes/no step in front of a destructive action.

use leptos::prelude::*;
use portfolio_engine::Confirmation;

/// Inline delete confirmation button
///
/// Shows a trash button initially. When clicked, shows "Supprimer ?" with
/// ✓/✗ buttons and reports the answer through `on_decision`.
///
/// # Arguments
/// * `button_class` - CSS class for the initial delete button
/// * `on_decision` - Receives `Confirmed` or `Declined`
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_decision: Callback<Confirmation>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);

    view! {
        <Show when=move || !asking.get()>
            <button
                class=button_class.clone()
                title="Supprimer"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_asking.set(true);
                }
            >
                "🗑"
            </button>
        </Show>
        <Show when=move || asking.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Supprimer ?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_decision.run(Confirmation::Confirmed);
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_decision.run(Confirmation::Declined);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}

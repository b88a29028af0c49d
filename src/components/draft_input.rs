//! Draft Input Component
//!
//! Labeled text field bound to one draft field of the engine.

use leptos::prelude::*;
use portfolio_engine::DraftField;

use crate::components::Tooltip;
use crate::context::use_app;
use crate::store::AppStateStoreFields;

/// Keystrokes go straight to the engine; the displayed value comes back
/// through the store.
///
/// # Arguments
/// * `numeric` - Render as a number input
/// * `on_enter` - Fired when Enter is pressed inside the field
#[component]
pub fn DraftInput(
    field: DraftField,
    #[prop(into)] label: String,
    #[prop(into)] placeholder: String,
    #[prop(optional, into)] tooltip: Option<String>,
    #[prop(optional)] numeric: bool,
    #[prop(optional)] on_enter: Option<Callback<()>>,
) -> impl IntoView {
    let app = use_app();
    let draft = app.store.draft();
    let input_type = if numeric { "number" } else { "text" };

    view! {
        <div class="field">
            <label class="field-label">
                {label}
                {tooltip.map(|text| view! { <Tooltip text=text /> })}
            </label>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || draft.with(|d| d.get(field).to_string())
                on:input=move |ev| app.set_field(field, event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        if let Some(callback) = on_enter {
                            callback.run(());
                        }
                    }
                }
            />
        </div>
    }
}

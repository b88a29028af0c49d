use leptos::prelude::*;
use portfolio_engine::Transition;

use crate::context::use_app;

/// Returns to the menu
#[component]
pub fn BackButton(#[prop(into)] label: String) -> impl IntoView {
    let app = use_app();

    view! {
        <button class="back-btn" on:click=move |_| app.navigate(Transition::Back)>
            "← " {label}
        </button>
    }
}

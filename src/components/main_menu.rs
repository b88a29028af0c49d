use leptos::prelude::*;
use portfolio_engine::{Screen, Transition};

use crate::context::use_app;

/// Menu entries: target, icon, title, subtitle
const MENU_ENTRIES: &[(Screen, &str, &str, &str)] = &[
    (Screen::AddForm, "＋", "Ajouter un bien", "Nouvelle acquisition"),
    (Screen::ListView, "▤", "Mon patrimoine", "Biens, rendements, cashflow"),
    (Screen::AdvisorView, "◎", "Conseiller IA", "Endettement et capacité d'emprunt"),
];

#[component]
pub fn MainMenu() -> impl IntoView {
    let app = use_app();

    view! {
        <div class="menu">
            {MENU_ENTRIES.iter().map(|(target, icon, title, subtitle)| {
                let target = *target;
                view! {
                    <button
                        class="menu-btn"
                        on:click=move |_| app.navigate(Transition::Open(target))
                    >
                        <div class="menu-icon">{*icon}</div>
                        <div class="menu-text">
                            <b>{*title}</b>
                            <span>{*subtitle}</span>
                        </div>
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

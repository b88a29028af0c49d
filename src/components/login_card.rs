//! Login Card Component
//!
//! Passwordless sign-in: the user enters an email and receives a link.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::Tooltip;
use crate::context::use_app;
use crate::store::AppStateStoreFields;

#[component]
pub fn LoginCard() -> impl IntoView {
    let app = use_app();
    let demo_mode = app.store.demo_mode();

    let (email, set_email) = signal(String::new());
    let (sending, set_sending) = signal(false);

    let send_link = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked();
        let engine = app.engine();
        set_sending.set(true);
        spawn_local(async move {
            // Success and failure both surface as a toast
            let _ = engine.sign_in(&address).await;
            set_sending.set(false);
        });
    };

    view! {
        <div class="center-content">
            <div class="icon-circle">"🏛"</div>
            <h1 class="title">"ImmoGestion Pro"</h1>
            <p class="subtitle">"Pilotez votre patrimoine immobilier comme un professionnel."</p>

            <Show when=move || demo_mode.get()>
                <p class="demo-hint">
                    "Mode démo : aucune donnée ne quitte ce navigateur, la connexion est immédiate."
                </p>
            </Show>

            <form class="login-form" on:submit=send_link>
                <label class="field-label">
                    "Votre email"
                    <Tooltip text="Un lien de connexion à usage unique vous sera envoyé. Aucun mot de passe." />
                </label>
                <input
                    type="email"
                    placeholder="Ex: invest@immo.fr"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <button type="submit" class="main-btn" disabled=move || sending.get()>
                    {move || if sending.get() { "Envoi..." } else { "Recevoir mon lien" }}
                </button>
            </form>
        </div>
    }
}

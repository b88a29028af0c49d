use leptos::prelude::*;

use crate::context::use_app;
use crate::store::AppStateStoreFields;

/// The current notification, if any
#[component]
pub fn ToastView() -> impl IntoView {
    let app = use_app();
    let toast = app.store.toast();

    move || {
        toast.get().map(|toast| {
            let (class, icon) = if toast.notification.is_error() {
                ("toast toast-error", "✕")
            } else {
                ("toast toast-success", "✓")
            };
            view! {
                <div class=class role="status">
                    <span class="toast-icon">{icon}</span>
                    <span>{toast.notification.message}</span>
                </div>
            }
        })
    }
}

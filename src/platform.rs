//! Browser-side engine collaborators: timer and toast notifier

use std::cell::Cell;
use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use portfolio_engine::repository::{Notifier, Timer};
use portfolio_engine::Notification;

use crate::store::{AppStateStoreFields, AppStore, Toast};

/// `setTimeout`-backed sleep
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Shows one toast at a time; each clears itself after `display_ms`
/// unless a newer one replaced it
pub struct ToastNotifier {
    store: AppStore,
    display_ms: u32,
    next_id: Cell<u64>,
}

impl ToastNotifier {
    pub fn new(store: AppStore, display_ms: u32) -> Self {
        Self {
            store,
            display_ms,
            next_id: Cell::new(0),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        if notification.is_error() {
            tracing::warn!(message = %notification.message, "error toast");
        } else {
            tracing::info!(message = %notification.message, "toast");
        }
        self.store.toast().set(Some(Toast { id, notification }));

        let store = self.store;
        let display_ms = self.display_ms;
        spawn_local(async move {
            TimeoutFuture::new(display_ms).await;
            let still_shown = store.toast().with_untracked(|t| t.as_ref().map(|t| t.id) == Some(id));
            if still_shown {
                store.toast().set(None);
            }
        });
    }
}

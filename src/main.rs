//! ImmoGestion Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod format;
mod models;
mod platform;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = rolling_logger::init_logger("ImmoGestion", tracing::Level::DEBUG) {
        web_sys::console::error_1(&err.to_string().into());
    }
    mount_to_body(App);
}

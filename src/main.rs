#![allow(non_snake_case)]

use dioxus::prelude::*;

// Modules
mod components;
mod models;
mod routes;
mod services;
mod utils;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting planbook client");

    // Launch the Dioxus web app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        Router::<routes::Route> {}
    }
}

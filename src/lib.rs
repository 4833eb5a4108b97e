#![recursion_limit = "512"]

pub mod dto;
pub mod errors;
pub mod provider;
pub mod wallet;

pub mod components;
#[cfg(feature = "ssr")]
pub mod initialize;

pub mod server;

pub mod app;

#[cfg(feature = "hydrate")]
mod console_log;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    console_log::init();
    leptos::mount::hydrate_body(App);
}

//! chimoney-checkout Web Frontend
//!
//! Leptos-based WASM checkout form. Collects an amount and email, asks the
//! checkout server for a Chimoney payment link and sends the browser there.

mod api;
mod app;
mod components;
mod form;
mod pages;

pub use app::App;
pub use form::{CheckoutForm, CheckoutView, FormError};

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

//! Scout WASM Control Runtime
//!
//! Loaded by the control page the rover serves. Points the video element at
//! the rover's MJPEG stream, turns d-pad drags, touches, and arrow keys into
//! debounced `/drive` requests, and drives the settings overlay.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod transport;
mod indicator;
mod input;
mod settings;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point — called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second module instance on the page keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Scout control runtime initialized");
}

/// Bind drive control to the page. Called from JavaScript once the page has loaded.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn create_app() -> Result<app::App, JsValue> {
    app::App::attach()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn show_settings() -> Result<(), JsValue> {
    settings::set_panel_visible(true)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn hide_settings() -> Result<(), JsValue> {
    settings::set_panel_visible(false)
}

/// Best-effort `/config` request, e.g. from a settings slider's `onchange`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_parameter(name: String, value: String) -> Result<(), JsValue> {
    use scout_control::{CommandSink, ConfigParam};

    let sink = transport::FetchSink::new(transport::page_endpoint()?);
    sink.set_parameter(&ConfigParam::new(name, value));
    Ok(())
}

use scout_control::{CommandSink, ConfigParam, DriveCommand, Endpoint};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Endpoint of the rover that served this page.
pub fn page_endpoint() -> Result<Endpoint, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let origin = window.location().origin()?;
    Endpoint::new(&origin).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Issue a GET and forget about it. Rejections are logged and dropped.
pub fn fire_and_forget(url: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.fetch_with_str(&url);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::debug!("request to {url} dropped: {e:?}");
        }
    });
}

/// Sends commands with `fetch`.
pub struct FetchSink {
    endpoint: Endpoint,
}

impl FetchSink {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

impl CommandSink for FetchSink {
    fn drive(&self, cmd: DriveCommand) {
        fire_and_forget(self.endpoint.drive_url(&cmd));
    }

    fn set_parameter(&self, param: &ConfigParam) {
        fire_and_forget(self.endpoint.config_url(param));
    }
}

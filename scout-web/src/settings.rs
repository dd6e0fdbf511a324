/// Elements that make up the settings overlay.
pub const PANEL_IDS: [&str; 2] = ["settings-background", "settings"];

/// CSS `display` value for the overlay.
pub fn display_value(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

#[cfg(target_arch = "wasm32")]
pub fn set_panel_visible(visible: bool) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    for id in PANEL_IDS {
        let Some(element) = document.get_element_by_id(id) else {
            log::warn!("settings element #{id} missing");
            continue;
        };
        let element = element
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| "Settings element is not an HTML element")?;
        element
            .style()
            .set_property("display", display_value(visible))?;
    }
    Ok(())
}

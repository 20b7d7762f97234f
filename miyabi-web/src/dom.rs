use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Storage, Window};

/// Global `window`, absent outside a browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns a description if there is no window or `localStorage` is disabled.
pub fn local_storage() -> Result<Storage, String> {
    window()
        .ok_or_else(|| String::from("window unavailable"))?
        .local_storage()
        .map_err(|e| js_error_message(&e))?
        .ok_or_else(|| String::from("localStorage disabled"))
}

/// Open `url` in a new browsing context without handing it our `window`.
pub fn open_in_new_tab(url: &str) {
    let Some(win) = window() else {
        return;
    };
    if let Err(err) = win.open_with_url_and_target_and_features(url, "_blank", "noopener") {
        log::warn!("could not open {url}: {}", js_error_message(&err));
    }
}

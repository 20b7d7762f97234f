// Accessibility helpers

/// Id of the polite live region announcements are written to.
pub const STATUS_REGION_ID: &str = "rally-status";

/// Focus ring and screen-reader-only utility CSS, injected once at the app root.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #c5a059;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Announce `msg` through the live region, if it is mounted.
pub fn set_status(msg: &str) {
    if let Some(node) =
        crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Element that currently has keyboard focus.
#[must_use]
pub fn active_element() -> Option<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;
    crate::dom::document()
        .and_then(|doc| doc.active_element())
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Return focus to the element that opened an overlay.
pub fn restore_focus(previous: Option<&web_sys::HtmlElement>) {
    if let Some(el) = previous {
        let _ = el.focus();
    }
}

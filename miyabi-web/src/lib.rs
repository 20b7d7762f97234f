#![forbid(unsafe_code)]
//! Browser front-end for the Miyabi stamp rally.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod camera;
pub mod components;
pub mod dom;
pub mod fortune;
pub mod i18n;
pub mod logging;
pub mod map;
pub mod pages;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
    // Sync <html lang> with the saved locale before the first render.
    i18n::set_lang(&i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}

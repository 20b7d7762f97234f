#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;
use miyabi_core::constants::{STAMP_SETTLE_MS, STORAGE_KEY};
use miyabi_core::{Catalog, FortuneClient, MapAdapter, ProgressStorage, ProgressStore, StampSet};
use miyabi_web::app::{App, AppHandlers, use_app_state_with, view};
use miyabi_web::components::overlay::{Overlay, Placement, Props as OverlayProps};
use miyabi_web::components::rally_map::{Props as RallyMapProps, RallyMap};
use miyabi_web::map::LeafletAdapter;
use miyabi_web::storage::BrowserStorage;
use miyabi_web::{dom, i18n};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use yew::Renderer;
use yew::prelude::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

/// Stand-in for the Leaflet global that records every call made on the map.
const RECORDING_LEAFLET: &str = r"
window.leafletCalls = [];
window.L = {
  map: function () {
    return {
      on: function (name) { window.leafletCalls.push('on:' + name); return this; },
      once: function (name) { window.leafletCalls.push('once:' + name); return this; },
      locate: function () { window.leafletCalls.push('locate'); return this; },
      removeLayer: function () { return this; },
      remove: function () { window.leafletCalls.push('remove'); return this; }
    };
  },
  tileLayer: function () { return { addTo: function () { return this; } }; }
};
";

fn clear_progress() {
    if let Ok(storage) = dom::local_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

/// Replace any previous `#app` root with an empty one.
fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(previous) = doc.get_element_by_id("app") {
        previous.remove();
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

/// Give the scheduler and pending effects a chance to run.
async fn settle() {
    TimeoutFuture::new(50).await;
}

fn find(root: &web_sys::Element, selector: &str) -> web_sys::HtmlElement {
    root.query_selector(selector)
        .expect("valid selector")
        .unwrap_or_else(|| panic!("no element matches {selector}"))
        .dyn_into()
        .expect("html element")
}

fn active_element_id() -> Option<String> {
    dom::document()
        .and_then(|doc| doc.active_element())
        .map(|el| el.id())
}

fn remove_leaflet() {
    let window = dom::window().expect("window");
    let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str("L"));
}

fn leaflet_calls() -> Vec<String> {
    let window = dom::window().expect("window");
    let calls = js_sys::Reflect::get(&window, &JsValue::from_str("leafletCalls"))
        .expect("recorded calls");
    js_sys::Array::from(&calls)
        .iter()
        .filter_map(|call| call.as_string())
        .collect()
}

fn overlay_props(closes: &Rc<Cell<u32>>) -> OverlayProps {
    let closes = Rc::clone(closes);
    OverlayProps {
        title: AttrValue::from("白糸の滝"),
        on_close: Callback::from(move |()| closes.set(closes.get() + 1)),
        placement: Placement::Sheet,
        hide_title: false,
        children: Children::new(vec![html! { <p id="overlay-body">{ "body" }</p> }]),
    }
}

fn key_event(key: &str) -> web_sys::KeyboardEvent {
    let init = web_sys::KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event")
}

/// Fortune that takes a while to arrive and counts its requests.
struct SlowFortune {
    calls: Cell<u32>,
    delay_ms: u32,
}

#[async_trait(?Send)]
impl FortuneClient for SlowFortune {
    async fn fetch_fortune(&self, location_name: &str) -> String {
        self.calls.set(self.calls.get() + 1);
        TimeoutFuture::new(self.delay_ms).await;
        format!("{location_name}で大吉")
    }
}

#[derive(Properties, Clone)]
struct StampHarnessProps {
    catalog: Rc<Catalog>,
    fortune: Rc<dyn FortuneClient>,
}

impl PartialEq for StampHarnessProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog) && Rc::ptr_eq(&self.fortune, &other.fortune)
    }
}

/// Full rally view that scans the next checkpoint and presses stamp on mount.
#[function_component(StampHarness)]
fn stamp_harness(props: &StampHarnessProps) -> Html {
    let state = use_app_state_with(Rc::clone(&props.catalog), Rc::clone(&props.fortune));
    let handlers = AppHandlers::new(&state);
    {
        let state = state.clone();
        let stamp = handlers.stamp.clone();
        use_effect_with((), move |()| {
            let scanned = state.update(|s| {
                s.start();
                s.open_scanner();
                let pending = s.request_scan()?;
                s.resolve_scan(pending).map(|cp| cp.id)
            });
            if scanned.is_some() {
                stamp.emit(());
            }
        });
    }
    view::render_app(&state, &handlers)
}

#[wasm_bindgen_test]
fn progress_round_trips_through_local_storage() {
    clear_progress();
    let store = ProgressStore::new(BrowserStorage);
    assert_eq!(store.load(), StampSet::new());

    let once = store.mark_stamped(&StampSet::new(), 4);
    let twice = store.mark_stamped(&once, 2);
    assert_eq!(BrowserStorage.read(STORAGE_KEY).unwrap().as_deref(), Some("[2,4]"));
    assert_eq!(ProgressStore::new(BrowserStorage).load(), twice);
    clear_progress();
}

#[wasm_bindgen_test]
fn corrupt_local_storage_loads_as_empty() {
    BrowserStorage.write(STORAGE_KEY, "{not json").unwrap();
    assert!(ProgressStore::new(BrowserStorage).load().is_empty());
    clear_progress();
}

#[wasm_bindgen_test]
async fn app_mounts_with_status_region() {
    clear_progress();
    let handle = Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;
    let doc = dom::document().expect("document");
    let region = doc.get_element_by_id("rally-status").expect("live region");
    assert_eq!(region.get_attribute("aria-live").as_deref(), Some("polite"));
    let main = doc.get_element_by_id("main").expect("main landmark");
    assert_eq!(main.tag_name(), "MAIN");
    handle.destroy();
}

#[wasm_bindgen_test]
async fn overlay_closes_on_escape_and_backdrop_only() {
    let closes = Rc::new(Cell::new(0));
    let root = ensure_app_root();
    let handle =
        Renderer::<Overlay>::with_root_and_props(root.clone(), overlay_props(&closes)).render();
    settle().await;

    let dialog = find(&root, "[role=dialog]");
    dialog.dispatch_event(&key_event("Enter")).expect("dispatch");
    assert_eq!(closes.get(), 0);
    dialog.dispatch_event(&key_event("Escape")).expect("dispatch");
    assert_eq!(closes.get(), 1);

    find(&root, "#overlay-body").click();
    assert_eq!(closes.get(), 1, "clicks inside the panel keep it open");
    find(&root, "[role=presentation]").click();
    assert_eq!(closes.get(), 2);
    handle.destroy();
}

#[wasm_bindgen_test]
async fn overlay_returns_focus_to_its_opener() {
    let doc = dom::document().expect("document");
    let opener: web_sys::HtmlElement = doc
        .create_element("button")
        .expect("create button")
        .dyn_into()
        .expect("html element");
    opener.set_id("overlay-opener");
    doc.body()
        .expect("document body")
        .append_child(&opener)
        .expect("append opener");
    opener.focus().expect("focus opener");
    assert_eq!(active_element_id().as_deref(), Some("overlay-opener"));

    let closes = Rc::new(Cell::new(0));
    let root = ensure_app_root();
    let handle =
        Renderer::<Overlay>::with_root_and_props(root.clone(), overlay_props(&closes)).render();
    settle().await;
    let focused_dialog = doc
        .active_element()
        .and_then(|el| el.get_attribute("role"));
    assert_eq!(focused_dialog.as_deref(), Some("dialog"));

    handle.destroy();
    settle().await;
    assert_eq!(active_element_id().as_deref(), Some("overlay-opener"));
    opener.remove();
}

#[wasm_bindgen_test]
async fn rally_map_without_leaflet_shows_notice() {
    remove_leaflet();
    let root = ensure_app_root();
    let props = RallyMapProps {
        markers: Vec::new(),
        on_select: Callback::noop(),
    };
    let handle = Renderer::<RallyMap>::with_root_and_props(root.clone(), props).render();
    settle().await;

    let text = root.text_content().unwrap_or_default();
    assert!(text.contains(&i18n::t("locations.map_unavailable")), "{text}");
    let locate = root
        .query_selector("button[aria-label]")
        .expect("valid selector");
    assert!(locate.is_none(), "locate button hidden without a map");
    handle.destroy();
}

#[wasm_bindgen_test]
fn locate_user_reuses_location_listeners() {
    js_sys::eval(RECORDING_LEAFLET).expect("install recording Leaflet");
    let container: web_sys::HtmlElement = dom::document()
        .expect("document")
        .create_element("div")
        .expect("create container")
        .dyn_into()
        .expect("html element");

    let mut adapter = LeafletAdapter::mount(&container, "詳細を見る".into()).expect("map mounts");
    for _ in 0..3 {
        adapter.locate_user();
    }
    let calls = leaflet_calls();
    let count = |name: &str| calls.iter().filter(|call| *call == name).count();
    assert_eq!(count("locate"), 3);
    assert_eq!(count("on:locationfound"), 1);
    assert_eq!(count("on:locationerror"), 1);
    assert!(!calls.iter().any(|call| call.starts_with("once:")), "{calls:?}");

    drop(adapter);
    assert!(leaflet_calls().iter().any(|call| call == "remove"));
    remove_leaflet();
}

#[wasm_bindgen_test]
async fn stamp_is_saved_and_announced_before_the_fortune_arrives() {
    clear_progress();
    let catalog = Rc::new(Catalog::load_from_static().expect("bundled catalog"));
    let target = catalog.first().clone();
    let fortune = Rc::new(SlowFortune {
        calls: Cell::new(0),
        delay_ms: 400,
    });
    let props = StampHarnessProps {
        catalog: Rc::clone(&catalog),
        fortune: Rc::clone(&fortune) as Rc<dyn FortuneClient>,
    };
    let root = ensure_app_root();
    let handle = Renderer::<StampHarness>::with_root_and_props(root.clone(), props).render();

    // The seal animation is still settling.
    TimeoutFuture::new(STAMP_SETTLE_MS / 2).await;
    assert!(ProgressStore::new(BrowserStorage).load().is_empty());
    assert_eq!(fortune.calls.get(), 0);

    // Stamp recorded and announced while the fortune is still pending.
    TimeoutFuture::new(STAMP_SETTLE_MS / 2 + 150).await;
    assert!(ProgressStore::new(BrowserStorage).load().contains(target.id));
    assert_eq!(fortune.calls.get(), 1);
    let mut args = BTreeMap::new();
    args.insert("name", target.name.as_str());
    let status = dom::document()
        .and_then(|doc| doc.get_element_by_id("rally-status"))
        .and_then(|region| region.text_content());
    assert_eq!(status, Some(i18n::tr("a11y.stamped", Some(&args))));
    let fortune_text = format!("{}で大吉", target.name);
    assert!(!root.text_content().unwrap_or_default().contains(&fortune_text));

    TimeoutFuture::new(600).await;
    assert_eq!(fortune.calls.get(), 1);
    assert!(root.text_content().unwrap_or_default().contains(&fortune_text));

    handle.destroy();
    clear_progress();
}

//! Leaflet implementation of [`MapAdapter`].
//!
//! Leaflet is loaded from a `<script>` tag as the global `L`. Every entry
//! point that touches `L` is imported with `catch`, so a page where the
//! script failed to load gets a [`MapError`] instead of a trap.
use std::cell::RefCell;
use std::rc::Rc;

use miyabi_core::constants::{
    MAP_DEFAULT_CENTER, MAP_DEFAULT_ZOOM, MAP_LOCATE_MAX_ZOOM, MAP_TILE_ATTRIBUTION, MAP_TILE_URL,
};
use miyabi_core::{CheckpointId, MapAdapter, MapMarker};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::js_error_message;

const USER_PIN_HTML: &str = "<div class=\"w-4 h-4 bg-blue-500 rounded-full border-2 border-white shadow-lg relative\"><div class=\"absolute inset-0 bg-blue-500 rounded-full animate-ping opacity-75\"></div></div>";
const USER_PIN_SIZE: u32 = 20;

#[wasm_bindgen]
extern "C" {
    type LeafletMap;
    type LeafletLayer;
    type LeafletMarker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container: &web_sys::HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn create_tile_layer(url: &str, options: &JsValue) -> Result<LeafletLayer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn create_marker(lat_lng: &JsValue, options: &JsValue) -> Result<LeafletMarker, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    fn create_div_icon(options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn locate(this: &LeafletMap, options: &JsValue);

    #[wasm_bindgen(method, js_name = on)]
    fn on_map_event(this: &LeafletMap, event: &str, handler: &JsValue);

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &LeafletMap, layer: &LeafletMarker);

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &LeafletLayer, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &LeafletMarker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &LeafletMarker, content: &str, options: &JsValue);

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMarker, event: &str, handler: &JsValue);
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Leaflet unavailable: {0}")]
    Unavailable(String),
    #[error("invalid map options: {0}")]
    Options(#[from] serde_wasm_bindgen::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
    zoom_control: bool,
    attribution_control: bool,
}

#[derive(Debug, Serialize)]
struct TileOptions {
    attribution: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DivIconOptions {
    class_name: &'static str,
    html: String,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupOptions {
    close_button: bool,
    offset: [i32; 2],
    class_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateOptions {
    set_view: bool,
    max_zoom: u8,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Id of the detail button inside a marker's popup.
#[must_use]
pub fn popup_button_id(id: CheckpointId) -> String {
    format!("popup-btn-{id}")
}

fn pin_icon(marker: &MapMarker) -> DivIconOptions {
    let size = marker.size();
    let html = format!(
        "<div style=\"width:{size}px;height:{size}px;background:{color};border:2px solid white;\
         border-radius:50% 50% 50% 0;transform:rotate(-45deg);box-shadow:0 4px 10px rgba(0,0,0,0.3);\
         display:flex;align-items:center;justify-content:center;\">\
         <div style=\"width:6px;height:6px;background:white;border-radius:50%;transform:rotate(45deg);\"></div></div>",
        color = marker.color(),
    );
    DivIconOptions {
        class_name: "custom-pin",
        html,
        icon_size: [size, size],
        icon_anchor: [size / 2, size],
    }
}

fn popup_html(marker: &MapMarker, button_label: &str) -> String {
    format!(
        "<div class=\"text-center p-1 font-sans\">\
         <h3 class=\"font-bold text-sm text-stone-900 mb-1 leading-tight\">{name}</h3>\
         <p class=\"text-[10px] text-stone-500 mb-2 truncate max-w-[150px] mx-auto\">{address}</p>\
         <button id=\"{button_id}\" class=\"bg-stone-900 text-white text-[10px] font-bold px-3 py-1.5 rounded-full hover:bg-stone-700 transition-colors w-full\">{label}</button>\
         </div>",
        name = escape_html(&marker.label),
        address = escape_html(&marker.address),
        button_id = popup_button_id(marker.id),
        label = escape_html(button_label),
    )
}

fn popup_options(marker: &MapMarker) -> PopupOptions {
    let half = i32::try_from(marker.size() / 2).unwrap_or(0);
    PopupOptions {
        close_button: false,
        offset: [0, -half],
        class_name: "custom-leaflet-popup",
    }
}

type ActivateHandler = Rc<RefCell<Option<Box<dyn Fn(CheckpointId)>>>>;

/// A mounted Leaflet map. Dropping it tears the map down.
pub struct LeafletAdapter {
    map: Rc<LeafletMap>,
    pins: Vec<LeafletMarker>,
    user_pin: Rc<RefCell<Option<LeafletMarker>>>,
    on_activate: ActivateHandler,
    popup_label: String,
}

impl LeafletAdapter {
    /// Create the map inside `container`, centred on the rally area.
    ///
    /// # Errors
    /// Returns [`MapError::Unavailable`] when the Leaflet global is missing.
    pub fn mount(container: &web_sys::HtmlElement, popup_label: String) -> Result<Self, MapError> {
        let (lat, lng) = MAP_DEFAULT_CENTER;
        let options = to_js(&MapOptions {
            center: [lat, lng],
            zoom: MAP_DEFAULT_ZOOM,
            zoom_control: false,
            attribution_control: false,
        })?;
        let map = create_map(container, &options)
            .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
        let tiles = create_tile_layer(
            MAP_TILE_URL,
            &to_js(&TileOptions {
                attribution: MAP_TILE_ATTRIBUTION,
            })?,
        )
        .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
        tiles.add_to(&map);
        log::debug!("map mounted");

        let adapter = Self {
            map: Rc::new(map),
            pins: Vec::new(),
            user_pin: Rc::new(RefCell::new(None)),
            on_activate: Rc::new(RefCell::new(None)),
            popup_label,
        };
        adapter.watch_location();
        Ok(adapter)
    }

    /// Listen for geolocation results for the lifetime of the map.
    /// `locate_user` only triggers a lookup.
    fn watch_location(&self) {
        let map = Rc::downgrade(&self.map);
        let user_pin = Rc::downgrade(&self.user_pin);
        let on_found = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let (Some(map), Some(user_pin)) = (map.upgrade(), user_pin.upgrade()) else {
                return;
            };
            show_user_location(&map, &user_pin, &event);
        });
        let on_error = Closure::<dyn FnMut(JsValue)>::new(|event: JsValue| {
            let message = js_sys::Reflect::get(&event, &JsValue::from_str("message"))
                .map(|m| js_error_message(&m))
                .unwrap_or_default();
            log::error!("geolocation failed: {message}");
        });
        self.map.on_map_event("locationfound", &on_found.into_js_value());
        self.map.on_map_event("locationerror", &on_error.into_js_value());
    }

    fn add_pin(&self, marker: &MapMarker) -> Result<LeafletMarker, MapError> {
        let icon = create_div_icon(&to_js(&pin_icon(marker))?)
            .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon)
            .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
        let pin = create_marker(&to_js(&[marker.lat, marker.lng])?, &options)
            .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
        pin.add_marker_to(&self.map);
        pin.bind_popup(
            &popup_html(marker, &self.popup_label),
            &to_js(&popup_options(marker))?,
        );

        let id = marker.id;
        let handler = Rc::clone(&self.on_activate);
        let on_open = Closure::<dyn FnMut()>::new(move || wire_popup_button(id, &handler));
        pin.on("popupopen", &on_open.into_js_value());
        Ok(pin)
    }
}

/// Point the popup's detail button at the current activate handler.
fn wire_popup_button(id: CheckpointId, handler: &ActivateHandler) {
    let Some(button) = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(&popup_button_id(id)))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let handler = Rc::clone(handler);
    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if let Some(callback) = handler.borrow().as_ref() {
            callback(id);
        }
    });
    let on_click = on_click.into_js_value();
    button.set_onclick(Some(on_click.unchecked_ref()));
}

impl MapAdapter for LeafletAdapter {
    fn render_markers(&mut self, markers: &[MapMarker]) {
        for pin in self.pins.drain(..) {
            self.map.remove_layer(&pin);
        }
        for marker in markers {
            match self.add_pin(marker) {
                Ok(pin) => self.pins.push(pin),
                Err(err) => {
                    log::error!("could not place marker {}: {err}", marker.id);
                    return;
                }
            }
        }
    }

    fn on_marker_activate(&mut self, handler: Box<dyn Fn(CheckpointId)>) {
        self.on_activate.replace(Some(handler));
    }

    fn locate_user(&mut self) {
        let options = match to_js(&LocateOptions {
            set_view: true,
            max_zoom: MAP_LOCATE_MAX_ZOOM,
        }) {
            Ok(options) => options,
            Err(err) => {
                log::error!("locate options: {err}");
                return;
            }
        };

        self.map.locate(&options);
    }
}

/// Replace the user pin with one at the event's `latlng`.
fn show_user_location(
    map: &LeafletMap,
    user_pin: &RefCell<Option<LeafletMarker>>,
    event: &JsValue,
) {
    let Ok(lat_lng) = js_sys::Reflect::get(event, &JsValue::from_str("latlng")) else {
        return;
    };
    if let Some(previous) = user_pin.borrow_mut().take() {
        map.remove_layer(&previous);
    }
    match place_user_pin(map, &lat_lng) {
        Ok(pin) => *user_pin.borrow_mut() = Some(pin),
        Err(err) => log::error!("could not show user location: {err}"),
    }
}

fn place_user_pin(map: &LeafletMap, lat_lng: &JsValue) -> Result<LeafletMarker, MapError> {
    let icon = create_div_icon(&to_js(&DivIconOptions {
        class_name: "user-location-pulse",
        html: USER_PIN_HTML.to_string(),
        icon_size: [USER_PIN_SIZE, USER_PIN_SIZE],
        icon_anchor: [USER_PIN_SIZE / 2, USER_PIN_SIZE / 2],
    })?)
    .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon)
        .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
    let pin = create_marker(lat_lng, &options)
        .map_err(|e| MapError::Unavailable(js_error_message(&e)))?;
    pin.add_marker_to(map);
    Ok(pin)
}

impl Drop for LeafletAdapter {
    fn drop(&mut self) {
        self.map.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(stamped: bool) -> MapMarker {
        MapMarker {
            id: 7,
            lat: 35.3,
            lng: 138.6,
            label: "Fish & <Chips>".into(),
            address: "富士宮市".into(),
            stamped,
        }
    }

    #[test]
    fn pin_icon_anchors_at_bottom_centre() {
        let open = pin_icon(&marker(false));
        assert_eq!(open.icon_size, [32, 32]);
        assert_eq!(open.icon_anchor, [16, 32]);
        assert!(open.html.contains("#cf2e2e"));
        let done = pin_icon(&marker(true));
        assert_eq!(done.icon_anchor, [12, 24]);
        assert!(done.html.contains("#c5a059"));
    }

    #[test]
    fn popup_escapes_labels_and_names_button() {
        let html = popup_html(&marker(false), "詳細を見る");
        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(html.contains("id=\"popup-btn-7\""));
        assert!(html.contains(">詳細を見る</button>"));
        assert_eq!(popup_options(&marker(false)).offset, [0, -16]);
    }

    #[test]
    fn options_serialize_with_leaflet_names() {
        let json = serde_json::to_value(MapOptions {
            center: [1.0, 2.0],
            zoom: 13,
            zoom_control: false,
            attribution_control: false,
        })
        .unwrap();
        assert_eq!(json["zoomControl"], false);
        assert_eq!(json["attributionControl"], false);
        let locate = serde_json::to_value(LocateOptions {
            set_view: true,
            max_zoom: 16,
        })
        .unwrap();
        assert_eq!(locate, serde_json::json!({"setView": true, "maxZoom": 16}));
    }
}

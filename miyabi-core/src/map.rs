//! Map integration contract and deep links.
//!
//! The rally never depends on a mapping library directly. Front-ends
//! implement [`MapAdapter`] over whatever library they ship and feed it the
//! markers built here.
use std::fmt::Write as _;

use serde::Serialize;

use crate::catalog::{Catalog, Checkpoint, CheckpointId};
use crate::constants::MAPS_SEARCH_BASE;
use crate::progress::StampSet;

const PIN_COLOR_STAMPED: &str = "#c5a059";
const PIN_COLOR_OPEN: &str = "#cf2e2e";
const PIN_SIZE_STAMPED: u32 = 24;
const PIN_SIZE_OPEN: u32 = 32;

/// One checkpoint pin as the map should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: CheckpointId,
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub address: String,
    pub stamped: bool,
}

impl MapMarker {
    /// Pin fill colour: gold once stamped, red otherwise.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        if self.stamped {
            PIN_COLOR_STAMPED
        } else {
            PIN_COLOR_OPEN
        }
    }

    /// Pin edge length in pixels; stamped pins shrink.
    #[must_use]
    pub const fn size(&self) -> u32 {
        if self.stamped {
            PIN_SIZE_STAMPED
        } else {
            PIN_SIZE_OPEN
        }
    }
}

/// Build one marker per checkpoint, in catalog order.
#[must_use]
pub fn markers(catalog: &Catalog, stamps: &StampSet) -> Vec<MapMarker> {
    catalog
        .checkpoints()
        .iter()
        .map(|cp| MapMarker {
            id: cp.id,
            lat: cp.lat,
            lng: cp.lng,
            label: cp.name.clone(),
            address: cp.address.clone(),
            stamped: stamps.contains(cp.id),
        })
        .collect()
}

/// Narrow interface over a concrete mapping library.
pub trait MapAdapter {
    /// Replace all checkpoint pins. The user-location marker is kept.
    fn render_markers(&mut self, markers: &[MapMarker]);

    /// Register the handler invoked when a pin's detail action is used.
    fn on_marker_activate(&mut self, handler: Box<dyn Fn(CheckpointId)>);

    /// One-shot geolocation; on success the map centres on the user and
    /// shows a transient marker. Failure leaves the map unchanged.
    fn locate_user(&mut self);
}

/// External map search link for a checkpoint (`name address` as the query).
#[must_use]
pub fn maps_search_url(checkpoint: &Checkpoint) -> String {
    let query = format!("{} {}", checkpoint.name, checkpoint.address);
    format!("{MAPS_SEARCH_BASE}{}", encode_uri_component(&query))
}

/// Percent-encode like ECMAScript `encodeURIComponent`.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        let unreserved = byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if unreserved {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_follow_catalog_and_progress() {
        let catalog = Catalog::load_from_static().unwrap();
        let stamps: StampSet = [2].into_iter().collect();
        let pins = markers(&catalog, &stamps);
        assert_eq!(pins.len(), catalog.len());
        assert!(!pins[0].stamped);
        assert_eq!(pins[0].color(), PIN_COLOR_OPEN);
        assert_eq!(pins[0].size(), 32);
        assert!(pins[1].stamped);
        assert_eq!(pins[1].color(), PIN_COLOR_STAMPED);
        assert_eq!(pins[1].size(), 24);
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_uri_component("(ok)!*'~"), "(ok)!*'~");
        assert_eq!(encode_uri_component("滝"), "%E6%BB%9D");
    }

    #[test]
    fn search_url_joins_name_and_address() {
        let catalog = Catalog::load_from_static().unwrap();
        let cp = catalog.checkpoint(3).unwrap();
        let url = maps_search_url(cp);
        assert!(url.starts_with(MAPS_SEARCH_BASE));
        let expected = encode_uri_component(&format!("{} {}", cp.name, cp.address));
        assert!(url.ends_with(&expected));
        assert!(url.contains("%20"));
    }
}

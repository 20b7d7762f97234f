//! Centralized tuning constants for the rally engine.
//!
//! Timings and storage keys live here so the web front-end and the headless
//! tester agree on the same values.

// Persistence ---------------------------------------------------------------
/// Storage key holding the JSON array of stamped checkpoint ids.
pub const STORAGE_KEY: &str = "miyabi_stamps";

// Timings -------------------------------------------------------------------
/// Simulated QR decode time between the demo-scan tap and the stamp overlay.
pub const SCAN_DELAY_MS: u32 = 1_000;
/// Pause after the stamp impact animation before the stamp is recorded.
pub const STAMP_SETTLE_MS: u32 = 800;

// Fortune -------------------------------------------------------------------
pub const FORTUNE_MODEL: &str = "gemini-2.5-flash";
pub const FORTUNE_FALLBACK_MISSING_KEY: &str = "The spirits are quiet today... (API Key missing)";
pub const FORTUNE_FALLBACK_NETWORK: &str =
    "The wind whispers unintelligible words... (Network Error)";
pub const FORTUNE_FALLBACK_EMPTY: &str = "Fortune cloudy, try again.";

// Map -----------------------------------------------------------------------
pub const MAP_DEFAULT_CENTER: (f64, f64) = (35.226, 138.610);
pub const MAP_DEFAULT_ZOOM: u8 = 13;
pub const MAP_LOCATE_MAX_ZOOM: u8 = 16;
pub const MAP_TILE_URL: &str =
    "https://{s}.basemaps.cartocdn.com/rastertiles/voyager_labels_under/{z}/{x}/{y}{r}.png";
pub const MAP_TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap &copy; CARTO";
pub const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

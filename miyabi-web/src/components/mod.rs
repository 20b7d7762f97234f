pub mod nav_bar;
pub mod overlay;
pub mod progress_ring;
pub mod rally_map;
pub mod stamp_seal;
pub mod ui;

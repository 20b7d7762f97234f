//! Miyabi Rally Engine
//!
//! Platform-agnostic core logic for the Miyabi stamp rally: the checkpoint
//! and prize catalog, persisted stamp progress, the view state machine that
//! drives scan → stamp → fortune, and the contracts front-ends implement for
//! maps and fortune generation. No browser dependencies live here.

pub mod catalog;
pub mod constants;
pub mod fortune;
pub mod map;
pub mod progress;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, Checkpoint, CheckpointId, Prize};
pub use fortune::{
    FailingFortune, FixedFortune, FortuneClient, FortuneFailure, fortune_prompt, resolve_fortune,
};
pub use map::{MapAdapter, MapMarker, encode_uri_component, maps_search_url, markers};
pub use progress::{MemoryStorage, ProgressStorage, ProgressStore, StampSet};
pub use session::{FortuneResult, PendingScan, RallySession, StampTicket};
pub use view::{NavTarget, View};

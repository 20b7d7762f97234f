pub mod checkpoint_detail;
pub mod fortune_result;
pub mod loading_overlay;
pub mod stamp_action;

pub use checkpoint_detail::CheckpointDetail;
pub use fortune_result::FortuneCard;
pub use loading_overlay::LoadingOverlay;
pub use stamp_action::StampAction;

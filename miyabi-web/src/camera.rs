//! Rear-camera preview for the scanner screen.
//!
//! Purely cosmetic: the scan itself is simulated, so any failure here is
//! logged and the screen keeps working without a picture.
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::dom::{js_error_message, window};

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera API not available")]
    Unsupported,
    #[error("camera request rejected: {0}")]
    Rejected(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoConstraints {
    facing_mode: &'static str,
}

/// A live camera stream. Tracks stop when it is dropped.
pub struct CameraStream {
    stream: MediaStream,
}

impl CameraStream {
    /// Ask for the environment-facing camera.
    ///
    /// # Errors
    /// [`CameraError::Unsupported`] without `navigator.mediaDevices`,
    /// [`CameraError::Rejected`] when the user or browser refuses.
    pub async fn acquire() -> Result<Self, CameraError> {
        let devices = window()
            .ok_or(CameraError::Unsupported)?
            .navigator()
            .media_devices()
            .map_err(|_| CameraError::Unsupported)?;

        let video = serde_wasm_bindgen::to_value(&VideoConstraints {
            facing_mode: "environment",
        })
        .map_err(|e| CameraError::Rejected(e.to_string()))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| CameraError::Rejected(js_error_message(&e)))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| CameraError::Rejected(js_error_message(&e)))?
            .dyn_into::<MediaStream>()
            .map_err(|e| CameraError::Rejected(js_error_message(&e)))?;
        Ok(Self { stream })
    }

    pub fn attach(&self, video: &HtmlVideoElement) {
        video.set_src_object(Some(&self.stream));
    }

    fn stop(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop();
    }
}

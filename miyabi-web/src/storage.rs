//! `localStorage` backing for stamp progress.
use miyabi_core::ProgressStorage;
use thiserror::Error;

use crate::dom::{js_error_message, local_storage};

#[derive(Debug, Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage read failed: {0}")]
    Read(String),
    #[error("localStorage write failed: {0}")]
    Write(String),
}

/// Browser `localStorage`, looked up on every access so a page that
/// blocks storage still runs on in-memory progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl ProgressStorage for BrowserStorage {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = local_storage().map_err(WebStorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| WebStorageError::Read(js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = local_storage().map_err(WebStorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| WebStorageError::Write(js_error_message(&e)))
    }
}

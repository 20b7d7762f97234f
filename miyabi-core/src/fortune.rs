//! Fortune (omikuji) client contract.
//!
//! A fortune client turns a checkpoint name into a short celebratory text.
//! It never fails from the caller's point of view: every failure class maps
//! to a fixed fallback sentence, and there is exactly one attempt per call.
use async_trait::async_trait;

use crate::constants::{
    FORTUNE_FALLBACK_EMPTY, FORTUNE_FALLBACK_MISSING_KEY, FORTUNE_FALLBACK_NETWORK,
};

/// Why a fortune could not be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortuneFailure {
    /// No credential was configured for the upstream service.
    MissingCredential,
    /// The request could not be completed.
    Transport,
    /// The service answered without any text.
    Empty,
}

impl FortuneFailure {
    #[must_use]
    pub const fn fallback_text(self) -> &'static str {
        match self {
            Self::MissingCredential => FORTUNE_FALLBACK_MISSING_KEY,
            Self::Transport => FORTUNE_FALLBACK_NETWORK,
            Self::Empty => FORTUNE_FALLBACK_EMPTY,
        }
    }
}

/// Collapse an upstream result into displayable text.
///
/// Blank text counts as [`FortuneFailure::Empty`].
#[must_use]
pub fn resolve_fortune(result: Result<String, FortuneFailure>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FortuneFailure::Empty.fallback_text().to_string(),
        Err(failure) => failure.fallback_text().to_string(),
    }
}

/// Prompt sent upstream for a checkpoint.
#[must_use]
pub fn fortune_prompt(location_name: &str) -> String {
    format!(
        "You are a wise Japanese spirit living at {location_name}.\n\
         Write a very short, mystical, and poetic \"Omikuji\" (fortune) for a traveler who just arrived here.\n\
         It should be 2-3 sentences max.\n\
         Include a \"Lucky Item\" at the end.\n\
         Tone: Mystical, elegant, slightly archaic but understandable."
    )
}

/// Source of fortune texts.
///
/// Futures are not `Send` so browser implementations can hold `JsValue`s.
#[async_trait(?Send)]
pub trait FortuneClient {
    /// Produce a fortune for `location_name`. Always returns displayable text.
    async fn fetch_fortune(&self, location_name: &str) -> String;
}

/// Returns the same text for every checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFortune(pub String);

#[async_trait(?Send)]
impl FortuneClient for FixedFortune {
    async fn fetch_fortune(&self, _location_name: &str) -> String {
        resolve_fortune(Ok(self.0.clone()))
    }
}

/// Always fails with the given class, yielding its fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailingFortune(pub FortuneFailure);

#[async_trait(?Send)]
impl FortuneClient for FailingFortune {
    async fn fetch_fortune(&self, location_name: &str) -> String {
        log::debug!("fortune for {location_name} unavailable: {:?}", self.0);
        resolve_fortune(Err(self.0))
    }
}

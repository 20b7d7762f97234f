//! Gemini-backed fortune client.
use async_trait::async_trait;
use miyabi_core::constants::FORTUNE_MODEL;
use miyabi_core::{FortuneClient, FortuneFailure, fortune_prompt, resolve_fortune};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum FortuneError {
    #[error("no API key configured")]
    MissingKey,
    #[error("request failed: {0}")]
    Http(#[from] gloo::net::Error),
    #[error("upstream answered with status {0}")]
    Status(u16),
    #[error("response carried no text")]
    Empty,
}

impl FortuneError {
    #[must_use]
    pub const fn failure(&self) -> FortuneFailure {
        match self {
            Self::MissingKey => FortuneFailure::MissingCredential,
            Self::Http(_) | Self::Status(_) => FortuneFailure::Transport,
            Self::Empty => FortuneFailure::Empty,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, with its parts joined. `None` when blank.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn request_body(prompt: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: [Content {
            parts: [Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            thinking_config: ThinkingConfig { thinking_budget: 0 },
        },
    }
}

/// Fortune client calling the Gemini `generateContent` endpoint once per
/// request. Every failure is logged and turned into fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiFortuneClient {
    api_key: Option<String>,
    model: String,
}

impl GeminiFortuneClient {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: FORTUNE_MODEL.to_string(),
        }
    }

    /// Client keyed by the `MIYABI_GEMINI_API_KEY` set at build time.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(option_env!("MIYABI_GEMINI_API_KEY").map(str::to_string))
    }

    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, key: &str) -> String {
        format!("{ENDPOINT_BASE}/{}:generateContent?key={key}", self.model)
    }

    async fn generate(&self, location_name: &str) -> Result<String, FortuneError> {
        let key = self.api_key.as_deref().ok_or(FortuneError::MissingKey)?;
        let prompt = fortune_prompt(location_name);
        let response = gloo::net::http::Request::post(&self.endpoint(key))
            .json(&request_body(&prompt))?
            .send()
            .await?;
        if !response.ok() {
            return Err(FortuneError::Status(response.status()));
        }
        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(FortuneError::Empty)
    }
}

#[async_trait(?Send)]
impl FortuneClient for GeminiFortuneClient {
    async fn fetch_fortune(&self, location_name: &str) -> String {
        let outcome = self.generate(location_name).await.map_err(|err| {
            match err {
                FortuneError::MissingKey => log::warn!("fortune skipped: {err}"),
                _ => log::error!("fortune for {location_name} failed: {err}"),
            }
            err.failure()
        });
        resolve_fortune(outcome)
    }
}

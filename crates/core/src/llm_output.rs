//! Strict decoding of model completions.
//!
//! Completions are expected to be a single JSON object but frequently come
//! wrapped in Markdown fences or surrounded by prose. [`extract_json`] peels
//! that off; the `decode_*` functions then deserialize into the typed schema
//! and run structural validation. Any failure is reported as a
//! [`GenerationError`] so callers can decide whether to fall back.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::roadmap::RoadmapContent;
use crate::topic::GeneratedTopic;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json|JSON)?[ \t]*\r?\n?").expect("valid fence regex"));

/// Why a generation attempt produced no usable content.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The completion endpoint failed or returned nothing.
    #[error("Model call failed: {0}")]
    Upstream(String),

    /// The completion contained no `{ ... }` span.
    #[error("Model output contained no JSON object")]
    NoJson,

    /// The JSON did not match the expected schema.
    #[error("Model output did not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// The JSON matched the schema but failed structural checks.
    #[error("Model output failed validation: {0}")]
    Invalid(String),
}

impl GenerationError {
    /// Short machine-readable label, stored as a roadmap's fallback reason.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Upstream(_) => "upstream_error",
            GenerationError::NoJson => "no_json",
            GenerationError::Schema(_) => "schema_mismatch",
            GenerationError::Invalid(_) => "invalid_content",
        }
    }
}

/// Remove Markdown code fences and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Slice the completion down to the span between the first `{` and the last
/// `}`. Returns `None` when there is no such span.
pub fn extract_json(text: &str) -> Option<String> {
    let cleaned = strip_code_fences(text);
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    Some(cleaned[start..=end].to_string())
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let json = extract_json(text).ok_or(GenerationError::NoJson)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn decode_roadmap(text: &str) -> Result<RoadmapContent, GenerationError> {
    let content: RoadmapContent = decode(text)?;
    content.validate().map_err(GenerationError::Invalid)?;
    Ok(content)
}

pub fn decode_topic(text: &str) -> Result<GeneratedTopic, GenerationError> {
    let topic: GeneratedTopic = decode(text)?;
    topic.validate().map_err(GenerationError::Invalid)?;
    Ok(topic)
}

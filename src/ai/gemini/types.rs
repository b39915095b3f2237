//! Gemini `generateContent` payload types and the response decoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Request body sent upstream for a single prompt.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Wraps `prompt` verbatim in a single user turn with the fixed
    /// generation parameters.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// Why a 200 response did not contain `candidates[0].content.parts[0].text`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("index {index} out of range for '{key}'")]
    IndexOutOfRange { key: &'static str, index: usize },
}

// Every level is optional so a missing key decodes cleanly and is reported
// by `first_text` rather than as a generic serde failure.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    pub fn decode(body: &str) -> Result<Self, ShapeError> {
        serde_json::from_str(body).map_err(|e| ShapeError::Malformed(e.to_string()))
    }

    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Result<&str, ShapeError> {
        let candidates = self
            .candidates
            .as_deref()
            .ok_or(ShapeError::MissingKey("candidates"))?;
        let candidate = candidates.first().ok_or(ShapeError::IndexOutOfRange {
            key: "candidates",
            index: 0,
        })?;
        let content = candidate
            .content
            .as_ref()
            .ok_or(ShapeError::MissingKey("content"))?;
        let parts = content
            .parts
            .as_deref()
            .ok_or(ShapeError::MissingKey("parts"))?;
        let part = parts.first().ok_or(ShapeError::IndexOutOfRange {
            key: "parts",
            index: 0,
        })?;
        part.text.as_deref().ok_or(ShapeError::MissingKey("text"))
    }
}

/// Decode a raw 200 body straight to the generated text.
pub fn extract_text(body: &str) -> Result<String, ShapeError> {
    GenerateContentResponse::decode(body)?
        .first_text()
        .map(str::to_string)
}

//! Data models and structures
//!
//! Defines the caller-facing request and envelope shapes plus the process
//! configuration loaded at startup.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Body accepted by `POST /api/gemini`. Any other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundRequest {
    pub prompt: String,
}

impl InboundRequest {
    /// Decode and validate a raw request body.
    ///
    /// Anything that does not yield a non-empty string `prompt` is reported
    /// as [`Error::MissingPrompt`].
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(|request| !request.prompt.is_empty())
            .ok_or(Error::MissingPrompt)
    }
}

/// Envelope returned for every proxy call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl OutboundResponse {
    pub fn success(text: String) -> Self {
        Self {
            success: true,
            response: Some(text),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: String, details: Option<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error),
            details,
        }
    }
}

// Configuration
#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            gemini_base_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            upstream_timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Config(format!(
            "GEMINI_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
            raw
        ))),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

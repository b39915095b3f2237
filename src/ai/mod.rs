//! Upstream text generation
//!
//! The proxy handler talks to the upstream API only through
//! [`TextGenerationService`], so tests can swap in [`MockTextClient`].

pub mod gemini;
pub mod mock;

pub use gemini::GeminiTextClient;
pub use mock::MockTextClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Generate text for `prompt`, authenticating with `api_key`.
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String>;
}

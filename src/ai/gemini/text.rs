use super::client::GeminiHttpClient;
use super::types::{extract_text, GenerateContentRequest};
use crate::ai::TextGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Single-prompt text generation against Gemini's `generateContent`.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(model: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        model: String,
        timeout: Option<Duration>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let body = self.http.generate_content(api_key, &request).await?;

        extract_text(&body).map_err(|e| {
            tracing::error!("Error parsing Gemini response: {}", e);
            tracing::error!("Response content: {}", body);
            Error::ResponseShape(e)
        })
    }
}

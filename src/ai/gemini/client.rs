use crate::error::error_chain;
use crate::models::DEFAULT_GEMINI_BASE_URL;
use crate::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Lightweight Gemini REST client. Authentication is per call via the
/// `key` query parameter, so the client itself holds no secret.
pub struct GeminiHttpClient {
    client: Client,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-pro`); a
    /// `models/` prefix is stripped.
    pub fn new(model: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(model, timeout, Client::new())
    }

    pub fn new_with_client(model: String, timeout: Option<Duration>, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            model,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// POSTs `request` to `generateContent` and returns the raw body of a
    /// 200 response. Any other status becomes [`Error::Upstream`].
    pub async fn generate_content<Req: Serialize>(
        &self,
        api_key: &str,
        request: &Req,
    ) -> Result<String> {
        let mut builder = self
            .client
            .post(self.generate_content_url())
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!("Sending request to Gemini API (model: {})", self.model);

        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to send request to Gemini: {}", error_chain(&e));
            Error::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read Gemini response body: {}", error_chain(&e));
            Error::Transport(e)
        })?;

        if status != StatusCode::OK {
            tracing::error!("Gemini API error: {} - {}", status.as_u16(), body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

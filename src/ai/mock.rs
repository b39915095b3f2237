use super::gemini::types::ShapeError;
use super::TextGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Upstream { status: u16, body: String },
    Shape(ShapeError),
}

/// In-memory stand-in for the upstream API.
///
/// Replies cycle in the order they were added; with none configured the
/// prompt is echoed back.
#[derive(Clone, Default)]
pub struct MockTextClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_response(self, text: String) -> Self {
        self.replies.lock().unwrap().push(MockReply::Text(text));
        self
    }

    pub fn with_upstream_error(self, status: u16, body: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Upstream { status, body });
        self
    }

    pub fn with_shape_error(self, error: ShapeError) -> Self {
        self.replies.lock().unwrap().push(MockReply::Shape(error));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, oldest first.
    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_text(&self, _api_key: &str, prompt: &str) -> Result<String> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.prompts.lock().unwrap().push(prompt.to_string());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(format!("Echo: {}", prompt));
        }

        match replies[(count - 1) % replies.len()].clone() {
            MockReply::Text(text) => Ok(text),
            MockReply::Upstream { status, body } => Err(Error::Upstream { status, body }),
            MockReply::Shape(e) => Err(Error::ResponseShape(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_text_client_default_echoes_prompt() {
        let client = MockTextClient::new();
        let text = client.generate_text("key", "hello").await.unwrap();
        assert_eq!(text, "Echo: hello");
        assert_eq!(client.received_prompts(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_text_client_cycles_replies() {
        let client = MockTextClient::new()
            .with_text_response("first".to_string())
            .with_upstream_error(503, "unavailable".to_string());

        assert_eq!(client.generate_text("k", "a").await.unwrap(), "first");
        assert!(matches!(
            client.generate_text("k", "b").await.unwrap_err(),
            Error::Upstream { status: 503, .. }
        ));
        // Should cycle back
        assert_eq!(client.generate_text("k", "c").await.unwrap(), "first");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_text_client_shape_error() {
        let client = MockTextClient::new().with_shape_error(ShapeError::MissingKey("candidates"));
        let err = client.generate_text("k", "a").await.unwrap_err();
        assert!(matches!(err, Error::ResponseShape(_)));
    }
}

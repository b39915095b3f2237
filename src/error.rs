//! Error handling and custom error types
//!
//! Every failure a proxy call can hit maps to one variant here, and each
//! variant knows the HTTP status and envelope the caller receives.

use crate::ai::gemini::types::ShapeError;
use crate::models::OutboundResponse;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing prompt parameter")]
    MissingPrompt,

    /// The body could not be buffered, typically because it exceeds the
    /// configured size limit.
    #[error("Failed to read request body")]
    RequestBody(#[source] BytesRejection),

    #[error("API key not configured on server")]
    ApiKeyNotConfigured,

    #[error("Gemini API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Error parsing Gemini response")]
    ResponseShape(#[source] ShapeError),

    /// Must be built from an error whose URL has been stripped, since the
    /// upstream URL carries the API key.
    #[error("Error connecting to Gemini API")]
    Transport(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Status returned to the caller. Upstream failures never pass their
    /// own status through.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingPrompt => StatusCode::BAD_REQUEST,
            Error::RequestBody(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra diagnostic text for the envelope's `details` field.
    pub fn details(&self) -> Option<String> {
        match self {
            Error::ResponseShape(e) => Some(e.to_string()),
            Error::RequestBody(rejection) => Some(rejection.body_text()),
            Error::Transport(e) => Some(error_chain(e)),
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = OutboundResponse::failure(self.to_string(), self.details());
        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Joins an error and all of its sources with `": "`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

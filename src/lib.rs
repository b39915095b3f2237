//! Gemini prompt proxy - forwards a caller's prompt to Google's Gemini API
//!
//! The server keeps the Gemini API key to itself, accepts a bare
//! `{"prompt": ...}` body and answers with a small `{success, response|error}`
//! envelope regardless of how the upstream call went.

pub mod ai;
pub mod app;
pub mod error;
pub mod handlers;
pub mod models;

pub use error::{Error, Result};

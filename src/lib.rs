//! A smoke-test client for the Google Gemini `generateContent` endpoint.
//!
//! This crate backs the `gemini-probe` binary: it sends one chat message to the
//! generative-language REST API and extracts the answer text, so the whole
//! exchange can be exercised against a mock server.

pub mod client;
pub mod error;
pub mod types;
pub mod wire;

// Re-export core types for easy usage
pub use client::GeminiClient;
pub use error::Error;
pub use types::{GenerateRequest, Message, Role};

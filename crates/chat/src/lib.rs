//! # Clinic Chat
//!
//! HTTP client for the third-party chat-completion service backing the
//! portal's AI advice widget. The server holds the credential; clients send
//! their accumulated transcript and receive the upstream payload unmodified.

pub mod client;
pub mod types;

pub use client::{CompletionClient, DEFAULT_MODEL};
pub use types::ChatMessage;

/// Errors raised while talking to the upstream completion service.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid chat client configuration: {0}")]
    Config(String),
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream completion service returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode upstream response: {0}")]
    Decode(serde_json::Error),
}

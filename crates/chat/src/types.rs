//! Wire types for the upstream chat-completions endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single turn in a conversation transcript.
///
/// Roles are the upstream service's vocabulary (`system`, `user`,
/// `assistant`) and are passed through as-is; the transcript is held by the
/// client, never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Request body posted to the completions endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

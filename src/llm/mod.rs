//! Text-generation dependency used by the chat companion.
//!
//! The [`TextGenerator`] trait is the seam between the response selector and
//! whatever produces supportive replies. The production implementation is
//! [`openai::OpenAiCompatibleGenerator`], which talks to any endpoint speaking
//! the OpenAI Chat Completions protocol (OpenAI itself, the Hugging Face
//! router, a local server). Tests substitute their own implementations.

pub mod openai;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use openai::OpenAiCompatibleGenerator;

/// Default cap on generated tokens for a chat reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 250;

/// Default sampling temperature for a chat reply.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Every way a generation attempt can fail.
///
/// Callers in this crate never branch on the variant to decide *whether* to
/// fall back; the kind only feeds logging (and the one retry decision in the
/// selector, which skips retrying when no credential is configured).
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key configured.
    #[error("text generation credential is not configured")]
    MissingCredential,

    /// The API rejected the credential.
    #[error("text generation API rejected the credential ({status})")]
    Auth { status: u16 },

    /// Rate limited (HTTP 429) on every attempt.
    #[error("rate limited by text generation API")]
    RateLimited,

    /// Transport-level failure.
    #[error("text generation request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other non-success status.
    #[error("text generation API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The attempt exceeded its deadline.
    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),

    /// The response could not be turned into reply text.
    #[error("malformed text generation response: {0}")]
    Malformed(String),

    /// The generator task itself died.
    #[error("text generation task failed: {0}")]
    Internal(String),
}

impl GenerationError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::MissingCredential | Self::Auth { .. })
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Role of a message in a chat-completion conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single message in a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One generation request: the user's message framed by an optional system
/// prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: Option<String>,
    pub message: String,
    pub sampling: SamplingConfig,
}

impl GenerationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            message: message.into(),
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// The conversation as sent over the wire.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref prompt) = self.system_prompt {
            messages.push(ChatMessage::system(prompt.clone()));
        }
        messages.push(ChatMessage::user(self.message.clone()));
        messages
    }
}

// ---------------------------------------------------------------------------
// TextGenerator trait
// ---------------------------------------------------------------------------

/// Produces reply text for a chat message.
///
/// Implementations should report every failure as a [`GenerationError`]
/// rather than panicking; the selector still guards against panics by running
/// each attempt on its own task.
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Generate a reply.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

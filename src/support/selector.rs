//! Response selection for one inbound chat message.
//!
//! Order of precedence:
//! 1. Crisis phrase present: fixed crisis text, flagged. Generation is never
//!    attempted.
//! 2. Generated reply from the [`TextGenerator`].
//! 3. Generation failed: static reply from the first matching fallback
//!    bucket. When no bucket matches, generation is tried once more before
//!    settling on the default reply, as long as the message's time budget
//!    is not used up.
//!
//! [`ResponseSelector::select_response`] is infallible.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use super::keywords::{CrisisKeywordSet, FallbackCategory, FallbackTable};
use super::prompts::{CRISIS_RESPONSE, SYSTEM_PROMPT};
use crate::config::DEFAULT_LLM_TIMEOUT;
use crate::llm::{GenerationError, GenerationRequest, SamplingConfig, TextGenerator};

/// Which branch produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "category", rename_all = "lowercase")]
pub enum ResponseSource {
    Crisis,
    Generated,
    Fallback(FallbackCategory),
}

/// Reply text plus the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedResponse {
    pub text: String,
    pub source: ResponseSource,
}

impl SelectedResponse {
    /// True only for the crisis branch.
    pub fn is_crisis(&self) -> bool {
        self.source == ResponseSource::Crisis
    }

    pub fn into_parts(self) -> (String, bool) {
        let is_crisis = self.is_crisis();
        (self.text, is_crisis)
    }
}

/// Picks the assistant reply for a chat message.
///
/// Tables and generator are injected; the selector holds no mutable state,
/// so one instance is shared across all requests.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    crisis_keywords: Arc<CrisisKeywordSet>,
    fallback: Arc<FallbackTable>,
    generator: Arc<dyn TextGenerator>,
    sampling: SamplingConfig,
    timeout: Duration,
}

impl ResponseSelector {
    /// Selector with the canonical tables and texts.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            crisis_keywords: Arc::new(CrisisKeywordSet::default()),
            fallback: Arc::new(FallbackTable::default()),
            generator,
            sampling: SamplingConfig::default(),
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    pub fn with_tables(mut self, crisis: Arc<CrisisKeywordSet>, fallback: Arc<FallbackTable>) -> Self {
        self.crisis_keywords = crisis;
        self.fallback = fallback;
        self
    }

    /// Time budget for generation on one message, retry included. Expiry
    /// counts as a failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn fallback_table(&self) -> &FallbackTable {
        &self.fallback
    }

    /// Crisis phrases found in `message`, case-insensitively.
    pub fn detect_crisis(&self, message: &str) -> Vec<&str> {
        self.crisis_keywords.matches(&message.to_lowercase())
    }

    /// Choose the reply for `message`. Never fails.
    pub async fn select_response(&self, message: &str) -> SelectedResponse {
        let normalized = message.to_lowercase();

        let matched = self.crisis_keywords.matches(&normalized);
        if !matched.is_empty() {
            log::warn!(
                "Crisis language detected ({} keyword(s)); returning crisis resources",
                matched.len()
            );
            return SelectedResponse {
                text: CRISIS_RESPONSE.to_string(),
                source: ResponseSource::Crisis,
            };
        }

        let deadline = Instant::now() + self.timeout;
        let error = match self.try_generate(message, deadline).await {
            Ok(text) => {
                return SelectedResponse {
                    text,
                    source: ResponseSource::Generated,
                }
            }
            Err(e) => e,
        };

        log::warn!(
            "Text generation via {} failed, using fallback reply: {}",
            self.generator.name(),
            error
        );

        let category = self.fallback.classify(&normalized);
        if category != FallbackCategory::Default
            || !error.is_retryable()
            || Instant::now() >= deadline
        {
            return self.fallback_response(category);
        }

        match self.try_generate(message, deadline).await {
            Ok(text) => SelectedResponse {
                text,
                source: ResponseSource::Generated,
            },
            Err(e) => {
                log::error!("Fallback text generation attempt failed: {}", e);
                self.fallback_response(FallbackCategory::Default)
            }
        }
    }

    fn fallback_response(&self, category: FallbackCategory) -> SelectedResponse {
        log::debug!("Using '{}' fallback reply", category);
        SelectedResponse {
            text: self.fallback.reply(category).to_string(),
            source: ResponseSource::Fallback(category),
        }
    }

    /// One generation attempt on its own task, cut off at `deadline`, so a
    /// panicking or hanging generator surfaces as an error instead of taking
    /// the request down with it.
    async fn try_generate(&self, message: &str, deadline: Instant) -> Result<String, GenerationError> {
        let generator = Arc::clone(&self.generator);
        let request = GenerationRequest::new(message)
            .with_system_prompt(SYSTEM_PROMPT)
            .with_sampling(self.sampling);

        let mut task = tokio::spawn(async move { generator.generate(&request).await });

        let text = match tokio::time::timeout_at(deadline, &mut task).await {
            Ok(Ok(result)) => result?,
            Ok(Err(join_error)) => return Err(GenerationError::Internal(join_error.to_string())),
            Err(_) => {
                task.abort();
                return Err(GenerationError::Timeout(self.timeout));
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::Malformed("generator returned empty text".into()));
        }
        Ok(text.to_string())
    }
}

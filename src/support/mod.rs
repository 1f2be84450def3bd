//! Chat companion reply logic.
//!
//! [`ResponseSelector`] decides, per inbound message, between the crisis
//! resources text, a generated reply, and a static fallback reply.

pub mod keywords;
pub mod prompts;
pub mod selector;

pub use keywords::{CrisisKeywordSet, FallbackBucket, FallbackCategory, FallbackTable};
pub use prompts::{CrisisResource, CRISIS_NOTICE, CRISIS_RESOURCES, CRISIS_RESPONSE, SYSTEM_PROMPT};
pub use selector::{ResponseSelector, ResponseSource, SelectedResponse};

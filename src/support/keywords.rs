//! Keyword tables: the crisis phrase set and the fallback topic buckets.
//!
//! Both tables match by lowercase substring containment. Short entries can
//! therefore fire inside unrelated words ("test" in "contest", "down" in
//! "download").

use serde::{Deserialize, Serialize};

/// Phrases that trigger the crisis branch.
pub const DEFAULT_CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "hurt myself",
    "self harm",
    "want to die",
    "better off dead",
    "no point living",
    "hopeless",
    "cutting",
    "pills",
    "overdose",
    "jump off",
    "hanging",
    "worthless",
    "everyone hates me",
    "can't go on",
    "tired of living",
];

/// Fixed set of lowercase crisis phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisKeywordSet {
    phrases: Vec<String>,
}

impl CrisisKeywordSet {
    /// Build a set; phrases are lowercased and blanks dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// All phrases contained in `normalized`, which must already be lowercase.
    pub fn matches<'a>(&'a self, normalized: &str) -> Vec<&'a str> {
        self.phrases
            .iter()
            .filter(|phrase| normalized.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Default for CrisisKeywordSet {
    fn default() -> Self {
        Self::new(DEFAULT_CRISIS_KEYWORDS)
    }
}

// ---------------------------------------------------------------------------
// Fallback buckets
// ---------------------------------------------------------------------------

/// Topic bucket for a static supportive reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackCategory {
    Anxiety,
    Depression,
    Stress,
    Lonely,
    School,
    Family,
    Default,
}

impl FallbackCategory {
    /// Keyword buckets in match order. `Default` is not listed; it is what
    /// remains when none of these match.
    pub const PRIORITY: [FallbackCategory; 6] = [
        FallbackCategory::Anxiety,
        FallbackCategory::Depression,
        FallbackCategory::Stress,
        FallbackCategory::Lonely,
        FallbackCategory::School,
        FallbackCategory::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anxiety => "anxiety",
            Self::Depression => "depression",
            Self::Stress => "stress",
            Self::Lonely => "lonely",
            Self::School => "school",
            Self::Family => "family",
            Self::Default => "default",
        }
    }

    fn default_words(&self) -> &'static [&'static str] {
        match self {
            Self::Anxiety => &["anxious", "anxiety", "panic", "worried", "nervous"],
            Self::Depression => &["sad", "depressed", "down", "empty", "numb"],
            Self::Stress => &["stress", "stressed", "overwhelmed", "pressure"],
            Self::Lonely => &["lonely", "alone", "isolated", "no friends"],
            Self::School => &["school", "homework", "grades", "exam", "test"],
            Self::Family => &["family", "parents", "mom", "dad", "siblings"],
            Self::Default => &[],
        }
    }

    fn default_reply(&self) -> &'static str {
        match self {
            Self::Anxiety => "I understand that anxiety can feel overwhelming. It's completely normal to feel this way sometimes. Have you tried any breathing exercises? Taking slow, deep breaths can help calm your mind. What's been triggering your anxiety lately?",
            Self::Depression => "I'm sorry you're feeling this way. Depression can make everything feel heavy and difficult. Please know that these feelings are temporary, even though they don't feel like it right now. Have you been able to talk to anyone you trust about how you're feeling?",
            Self::Stress => "It sounds like you're dealing with a lot of stress right now. That can be really exhausting. What's been the biggest source of stress for you lately? Sometimes breaking things down into smaller, manageable pieces can help.",
            Self::Lonely => "Feeling lonely can be one of the hardest emotions to deal with. You're not alone in feeling this way - many teens experience loneliness. Is there anyone in your life you feel comfortable reaching out to?",
            Self::School => "School can definitely be stressful and overwhelming sometimes. It's important to remember that your grades don't define your worth as a person. What specific aspects of school are causing you the most stress?",
            Self::Family => "Family relationships can be complicated, especially during the teenage years. It's normal to have conflicts or feel misunderstood sometimes. Would you like to talk about what's been happening with your family?",
            Self::Default => "Thank you for sharing that with me. It takes courage to open up about your feelings. I'm here to listen and support you. How are you taking care of yourself today? What would help you feel a little better right now?",
        }
    }
}

impl std::fmt::Display for FallbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One keyword bucket with its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackBucket {
    pub category: FallbackCategory,
    pub words: Vec<String>,
    pub reply: String,
}

/// Ordered fallback buckets plus the default reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTable {
    buckets: Vec<FallbackBucket>,
    default_reply: String,
}

impl FallbackTable {
    /// Build a table. Buckets are matched in the order given; words are
    /// lowercased.
    pub fn new(buckets: Vec<FallbackBucket>, default_reply: impl Into<String>) -> Self {
        let buckets = buckets
            .into_iter()
            .map(|bucket| FallbackBucket {
                words: bucket.words.iter().map(|w| w.to_lowercase()).collect(),
                ..bucket
            })
            .collect();
        Self {
            buckets,
            default_reply: default_reply.into(),
        }
    }

    /// First bucket with a word contained in `normalized` (already lowercase).
    pub fn classify(&self, normalized: &str) -> FallbackCategory {
        self.buckets
            .iter()
            .find(|bucket| bucket.words.iter().any(|w| normalized.contains(w.as_str())))
            .map(|bucket| bucket.category)
            .unwrap_or(FallbackCategory::Default)
    }

    /// Reply for a category; unknown categories get the default reply.
    pub fn reply(&self, category: FallbackCategory) -> &str {
        self.buckets
            .iter()
            .find(|bucket| bucket.category == category)
            .map(|bucket| bucket.reply.as_str())
            .unwrap_or(&self.default_reply)
    }

    pub fn default_reply(&self) -> &str {
        &self.default_reply
    }

    /// Every reply this table can return, default last.
    pub fn replies(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .map(|bucket| bucket.reply.as_str())
            .chain(std::iter::once(self.default_reply.as_str()))
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        let buckets = FallbackCategory::PRIORITY
            .iter()
            .map(|category| FallbackBucket {
                category: *category,
                words: category.default_words().iter().map(|w| w.to_string()).collect(),
                reply: category.default_reply().to_string(),
            })
            .collect();
        Self::new(buckets, FallbackCategory::Default.default_reply())
    }
}

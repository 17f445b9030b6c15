//! FAQ Matcher - nearest-phrasing lookup over the knowledge base
//!
//! The main entry point for chatbot replies.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::knowledge::KnowledgeBase;
use crate::similarity::similarity;

/// A phrasing must score strictly above this to be accepted.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.75;

/// Reply when no phrasing clears the threshold.
pub const FALLBACK_REPLY: &str = "Sorry, main is query ka answer generate nahi kar pa raha hoon.";

/// Matcher configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Minimum similarity (exclusive) for a match to be returned
    pub threshold: f64,
    /// Returned when nothing clears `threshold`
    pub fallback_reply: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: ACCEPTANCE_THRESHOLD,
            fallback_reply: FALLBACK_REPLY.to_string(),
        }
    }
}

/// Best phrasing seen for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'kb> {
    /// Highest similarity across all (entry, phrasing) pairs
    pub score: f64,
    /// Answer of the winning entry; `None` only for an empty knowledge base
    pub answer: Option<&'kb str>,
    /// The phrasing that produced `score` (for debugging)
    pub phrasing: Option<&'kb str>,
}

impl<'kb> MatchResult<'kb> {
    fn none() -> Self {
        Self {
            score: 0.0,
            answer: None,
            phrasing: None,
        }
    }

    /// The answer, if the score clears `threshold`.
    pub fn accepted(&self, threshold: f64) -> Option<&'kb str> {
        if self.score > threshold {
            self.answer
        } else {
            None
        }
    }

    pub fn is_accepted(&self, threshold: f64) -> bool {
        self.accepted(threshold).is_some()
    }
}

/// Scan every phrasing in `kb` and keep the best-scoring one.
///
/// Only a strictly greater score replaces the current best, so the first
/// entry/phrasing in knowledge-base order wins ties.
/// `utterance` is compared lower-cased but otherwise as sent; stored
/// phrasings were already normalized at load time.
fn scan<'kb>(utterance: &str, kb: &'kb KnowledgeBase) -> MatchResult<'kb> {
    let utterance = utterance.to_lowercase();
    let mut best = MatchResult::none();

    for entry in kb.entries() {
        for phrasing in &entry.questions {
            let score = similarity(&utterance, phrasing);
            if best.answer.is_none() || score > best.score {
                best = MatchResult {
                    score,
                    answer: Some(&entry.answer),
                    phrasing: Some(phrasing),
                };
            }
        }
    }

    best
}

/// Reply for `utterance` with the default threshold and fallback.
pub fn find_reply<'kb>(utterance: &str, kb: &'kb KnowledgeBase) -> &'kb str {
    scan(utterance, kb)
        .accepted(ACCEPTANCE_THRESHOLD)
        .unwrap_or(FALLBACK_REPLY)
}

/// FAQ matcher over a shared, immutable knowledge base.
///
/// Holds no mutable state; one instance serves all concurrent requests.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    knowledge_base: Arc<KnowledgeBase>,
    config: MatcherConfig,
}

impl FaqMatcher {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self::with_config(knowledge_base, MatcherConfig::default())
    }

    pub fn with_config(knowledge_base: Arc<KnowledgeBase>, config: MatcherConfig) -> Self {
        Self {
            knowledge_base,
            config,
        }
    }

    /// Best-scoring phrasing for `utterance`, accepted or not.
    pub fn best_match(&self, utterance: &str) -> MatchResult<'_> {
        scan(utterance, &self.knowledge_base)
    }

    /// Reply text for `utterance`: the matched answer or the fallback.
    #[instrument(skip(self), fields(utterance = %utterance))]
    pub fn find_reply(&self, utterance: &str) -> &str {
        let best = self.best_match(utterance);

        match best.accepted(self.config.threshold) {
            Some(answer) => {
                debug!(
                    "Matched phrasing {:?} ({:.3})",
                    best.phrasing.unwrap_or_default(),
                    best.score
                );
                answer
            }
            None => {
                debug!(
                    "No phrasing above {} (best {:.3}), using fallback",
                    self.config.threshold, best.score
                );
                &self.config.fallback_reply
            }
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }
}

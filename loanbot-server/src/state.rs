//! Shared application state
//!
//! Built once in `main` and cloned into every handler. Tests build their own
//! with a fixture knowledge base.

use std::sync::Arc;

use loanbot_core::{FaqMatcher, KnowledgeBase, MatcherConfig};

#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<FaqMatcher>,
}

impl AppState {
    pub fn new(matcher: FaqMatcher) -> Self {
        Self {
            matcher: Arc::new(matcher),
        }
    }

    /// State over `knowledge_base` with the default threshold and fallback.
    pub fn from_knowledge_base(knowledge_base: KnowledgeBase) -> Self {
        Self::with_config(knowledge_base, MatcherConfig::default())
    }

    pub fn with_config(knowledge_base: KnowledgeBase, config: MatcherConfig) -> Self {
        Self::new(FaqMatcher::with_config(Arc::new(knowledge_base), config))
    }
}

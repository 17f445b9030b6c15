//! Loan enquiry FAQ matcher
//!
//! Answers chatbot questions by nearest-neighbour string matching against a
//! small, immutable knowledge base loaded once at startup.
//!
//! # Architecture
//!
//! ```text
//! User message
//!       │
//!       ▼
//! ┌─────────────────────────────────────────┐
//! │  to_lowercase()                         │
//! │  "Loan Eligibility KYA hai" →           │
//! │  "loan eligibility kya hai"             │
//! └─────────────────────────────────────────┘
//!       │
//!       ▼
//! ┌─────────────────────────────────────────┐
//! │  FaqMatcher (linear scan)               │
//! │  every entry × every phrasing           │
//! │  scored with Jaro-Winkler similarity    │
//! └─────────────────────────────────────────┘
//!       │
//!       ├─── best score > 0.75 ───► entry answer
//!       │
//!       ▼
//!   fallback reply
//! ```

pub mod error;
pub mod knowledge;
pub mod matcher;
pub mod similarity;

pub use error::KnowledgeBaseError;
pub use knowledge::{KnowledgeBase, KnowledgeBaseStats, KnowledgeEntry};
pub use matcher::{
    find_reply, FaqMatcher, MatchResult, MatcherConfig, ACCEPTANCE_THRESHOLD, FALLBACK_REPLY,
};
pub use similarity::{normalize, similarity};

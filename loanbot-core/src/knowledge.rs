//! KnowledgeBase - immutable FAQ entries for chatbot replies.
//!
//! The knowledge base is read from a static JSON or YAML file once at
//! startup. It is never mutated afterwards; a changed file requires a
//! restart. Share it via `Arc<KnowledgeBase>`.
//!
//! File format: a top-level sequence of entries.
//!
//! ```json
//! [
//!   {
//!     "questions": ["loan eligibility kya hai", "am i eligible for a loan"],
//!     "answer": "You need a minimum score of 650."
//!   }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KnowledgeBaseError;
use crate::similarity::normalize;

/// One FAQ answer and the phrasings that should resolve to it.
///
/// Phrasings include casual and mixed-language variants
/// ("loan kitne ka milega", "max loan amount").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub questions: Vec<String>,
    pub answer: String,
}

/// Ordered, validated collection of [`KnowledgeEntry`].
///
/// Entry and phrasing order is preserved exactly as loaded; the matcher
/// relies on it to break score ties.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Knowledge base with no entries. Every lookup against it falls back.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and normalize entries.
    ///
    /// Each entry needs at least one question, no blank questions, and a
    /// non-blank answer. Questions are stored trimmed and lower-cased.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Result<Self, KnowledgeBaseError> {
        let mut normalized = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.questions.is_empty() {
                return Err(KnowledgeBaseError::InvalidEntry {
                    index,
                    reason: "no questions".to_string(),
                });
            }
            if entry.answer.trim().is_empty() {
                return Err(KnowledgeBaseError::InvalidEntry {
                    index,
                    reason: "answer is empty".to_string(),
                });
            }

            let mut questions = Vec::with_capacity(entry.questions.len());
            for (q_index, question) in entry.questions.iter().enumerate() {
                let question = normalize(question);
                if question.is_empty() {
                    return Err(KnowledgeBaseError::InvalidEntry {
                        index,
                        reason: format!("question {} is empty", q_index),
                    });
                }
                questions.push(question);
            }

            normalized.push(KnowledgeEntry {
                questions,
                answer: entry.answer,
            });
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeBaseError> {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Parse a YAML sequence of entries.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, KnowledgeBaseError> {
        let entries: Vec<KnowledgeEntry> = serde_yaml::from_str(yaml)?;
        Self::from_entries(entries)
    }

    /// Load from a file, picking the parser from the extension
    /// (`.json`, `.yaml`, `.yml`).
    pub fn load(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, KnowledgeBaseError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => {
                return Err(KnowledgeBaseError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let contents = std::fs::read_to_string(path).map_err(|source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse(&contents)
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of question phrasings across all entries.
    pub fn phrasing_count(&self) -> usize {
        self.entries.iter().map(|e| e.questions.len()).sum()
    }

    pub fn stats(&self) -> KnowledgeBaseStats {
        KnowledgeBaseStats {
            entries: self.len(),
            phrasings: self.phrasing_count(),
        }
    }
}

/// Size summary, logged at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeBaseStats {
    pub entries: usize,
    pub phrasings: usize,
}

impl std::fmt::Display for KnowledgeBaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries, {} phrasings",
            self.entries, self.phrasings
        )
    }
}

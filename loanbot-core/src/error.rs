//! Error types for knowledge base loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a [`KnowledgeBase`](crate::KnowledgeBase).
///
/// Every variant is fatal for the server: it must not start answering chat
/// requests from a missing or corrupt knowledge base.
#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("Failed to read knowledge base from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid knowledge base YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported knowledge base format for {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Knowledge base entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

//! Error types for the knowledge domain.

use thiserror::Error;

/// Result type alias for knowledge operations.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Errors raised while assembling a knowledge store.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Duplicate company id: {0}")]
    DuplicateCompany(String),

    #[error("Knowledge base {knowledge_base} references unknown company: {company}")]
    UnknownCompany {
        knowledge_base: String,
        company: String,
    },

    #[error("Segment {segment} references unknown knowledge base: {knowledge_base}")]
    UnknownKnowledgeBase {
        segment: String,
        knowledge_base: String,
    },
}

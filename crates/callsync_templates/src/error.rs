//! Error types for template operations.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during catalog handling and content generation.
///
/// Missing variable data is never an error; resolution falls back to the
/// declared default instead.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("No knowledge base for company: {0}")]
    KnowledgeBaseNotFound(String),

    #[error("Invalid template {id}: {message}")]
    InvalidTemplate { id: String, message: String },

    #[error("Template syntax error: {0}")]
    Syntax(#[from] TemplateSyntaxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Malformed block markup detected while parsing a template body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateSyntaxError {
    #[error("Unclosed {{{{#each {name}}}}} block")]
    UnclosedBlock { name: String },

    #[error("{{{{/each}}}} without an open block")]
    UnexpectedClose,

    #[error("Block {{{{#each {inner}}}}} nested inside {{{{#each {outer}}}}}")]
    NestedBlock { outer: String, inner: String },
}

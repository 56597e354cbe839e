//! Error types for CRM sync.

use thiserror::Error;

use crate::config::CrmKind;

pub type CrmResult<T> = Result<T, CrmError>;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("No {0} API key provided")]
    MissingApiKey(CrmKind),

    #[error("Unsupported CRM type: {0}")]
    UnsupportedCrm(CrmKind),

    #[error("CRM sync is disabled")]
    SyncDisabled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

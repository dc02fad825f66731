//! Error types for civic

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Issue not found: #{0}")]
    NotFound(u32),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid report status: {0}")]
    InvalidReportStatus(String),

    #[error("Unknown badge kind: {0}")]
    InvalidBadgeKind(String),

    #[error("Unknown view: {0}")]
    InvalidView(String),

    #[error("Invalid issue draft: {0}")]
    InvalidDraft(String),

    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    #[error("Issue ids exhausted")]
    IdsExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

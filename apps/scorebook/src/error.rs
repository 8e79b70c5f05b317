use thiserror::Error;

use crate::domain::model::MatchId;
use crate::errors::{DomainError, ErrorCode, StoreError};

/// Service-level error returned by `ScoringService` and the config loaders.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Match not found: {match_id}")]
    NotFound { match_id: MatchId },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Error code for the caller to branch on (e.g. to pick a dialog).
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(e) => e.code(),
            AppError::Store(e) => e.code(),
            AppError::NotFound { .. } => ErrorCode::MatchNotFound,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn not_found(match_id: MatchId) -> Self {
        Self::NotFound { match_id }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Engine rejections are safe to retry once the precondition is fixed.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Domain(_))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

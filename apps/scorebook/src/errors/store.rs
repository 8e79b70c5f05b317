//! Errors reported by a `MatchStore` implementation.

use thiserror::Error;

use crate::errors::ErrorCode;

/// Persistence failures. None of these ever roll back local engine state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("stored document is corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unavailable(_) => ErrorCode::StoreUnavailable,
            Self::Timeout { .. } => ErrorCode::StoreTimeout,
            Self::Corrupt(_) => ErrorCode::DataCorruption,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

//! Engine-level error type.
//!
//! Returned by every rejected transition in the badminton and cricket
//! engines. It is persistence- and presentation-agnostic; the service layer
//! converts it into `crate::error::AppError` through `From`.

use thiserror::Error;

use crate::errors::ErrorCode;

/// Why a transition was rejected. A rejected transition never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Event inapplicable to the current state (e.g. a point after the match ended)
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    /// A batter or bowler must be chosen before the event can be recorded
    #[error("missing participant: {0}")]
    MissingParticipant(String),
    /// History is empty, or the last event belongs to a closed game/innings
    #[error("undo unavailable: {0}")]
    UndoUnavailable(String),
    /// Unsupported match configuration
    #[error("malformed format: {0}")]
    MalformedFormat(String),
}

impl DomainError {
    pub fn invalid_event(detail: impl Into<String>) -> Self {
        Self::InvalidEvent(detail.into())
    }
    pub fn missing_participant(detail: impl Into<String>) -> Self {
        Self::MissingParticipant(detail.into())
    }
    pub fn undo_unavailable(detail: impl Into<String>) -> Self {
        Self::UndoUnavailable(detail.into())
    }
    pub fn malformed_format(detail: impl Into<String>) -> Self {
        Self::MalformedFormat(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidEvent(_) => ErrorCode::InvalidEvent,
            Self::MissingParticipant(_) => ErrorCode::MissingParticipant,
            Self::UndoUnavailable(_) => ErrorCode::UndoUnavailable,
            Self::MalformedFormat(_) => ErrorCode::MalformedFormat,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidEvent(d)
            | Self::MissingParticipant(d)
            | Self::UndoUnavailable(d)
            | Self::MalformedFormat(d) => d,
        }
    }
}

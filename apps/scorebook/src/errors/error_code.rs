//! Error codes surfaced to callers of the scoring service.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are the strings a presentation
//! layer receives alongside a rejected transition.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Engine rejections
    /// Event is inapplicable to the current match state
    InvalidEvent,
    /// A required batter or bowler has not been chosen
    MissingParticipant,
    /// Nothing to undo, or the last event belongs to a closed game/innings
    UndoUnavailable,
    /// Unsupported match format (best-of, overs, roster size)
    MalformedFormat,

    // Lookup
    /// No local session and nothing in the remote store
    MatchNotFound,

    // Persistence
    /// Remote store could not be reached
    StoreUnavailable,
    /// Remote store did not answer in time
    StoreTimeout,
    /// Stored document could not be decoded
    DataCorruption,

    // System
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidEvent => "INVALID_EVENT",
            Self::MissingParticipant => "MISSING_PARTICIPANT",
            Self::UndoUnavailable => "UNDO_UNAVAILABLE",
            Self::MalformedFormat => "MALFORMED_FORMAT",

            Self::MatchNotFound => "MATCH_NOT_FOUND",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

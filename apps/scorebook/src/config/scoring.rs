//! Scoring defaults loaded from the environment.
//!
//! - `SCOREBOOK_BEST_OF`: default badminton format (1, 3 or 5; default 3)
//! - `SCOREBOOK_OVERS`: default cricket overs per innings (1..=50; default 20)
//! - `SCOREBOOK_SAVE_TIMEOUT_MS`: bound on each background save (default 5000)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::rules::{validate_best_of, validate_overs};
use crate::error::AppError;

pub const DEFAULT_BEST_OF: u8 = 3;
pub const DEFAULT_OVERS: u8 = 20;
pub const DEFAULT_SAVE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub default_best_of: u8,
    pub default_overs: u8,
    pub save_timeout: Duration,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_best_of: DEFAULT_BEST_OF,
            default_overs: DEFAULT_OVERS,
            save_timeout: Duration::from_millis(DEFAULT_SAVE_TIMEOUT_MS),
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let default_best_of = read_var("SCOREBOOK_BEST_OF", DEFAULT_BEST_OF)?;
        validate_best_of(default_best_of)
            .map_err(|e| AppError::config(format!("SCOREBOOK_BEST_OF: {}", e.detail())))?;

        let default_overs = read_var("SCOREBOOK_OVERS", DEFAULT_OVERS)?;
        validate_overs(default_overs)
            .map_err(|e| AppError::config(format!("SCOREBOOK_OVERS: {}", e.detail())))?;

        let timeout_ms: u64 = read_var("SCOREBOOK_SAVE_TIMEOUT_MS", DEFAULT_SAVE_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            return Err(AppError::config("SCOREBOOK_SAVE_TIMEOUT_MS must be positive"));
        }

        Ok(Self {
            default_best_of,
            default_overs,
            save_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.save_timeout = timeout;
        self
    }
}

fn read_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} is not a valid number: '{raw}'"))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::memory::InMemoryMatchStore;
pub use config::scoring::ScoringConfig;
pub use domain::{
    BadmintonMatch, BadmintonSetup, CricketMatch, CricketSetup, MatchId, MatchRecord, MatchState,
    MatchTransition, ScoringCommand, Side, Team,
};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode, StoreError};
pub use repos::matches::MatchStore;
pub use services::scoring::{ScoringOutcome, ScoringService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    scorebook_test_support::logging::init();
}

//! Scorebook test support utilities
//!
//! Shared helpers for unit and integration tests: one-time tracing
//! initialization and the environment-driven proptest configuration.

pub mod logging;
pub mod proptest_prelude;

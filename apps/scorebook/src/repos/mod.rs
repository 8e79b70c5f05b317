//! Persistence contracts the scoring service depends on.

pub mod matches;

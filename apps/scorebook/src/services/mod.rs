//! Services layer: orchestrates engines, sessions and persistence.

pub mod scoring;

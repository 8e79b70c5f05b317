//! Concrete `MatchStore` implementations.

pub mod memory;

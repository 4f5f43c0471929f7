//! Test infrastructure for p56mix.
//!
//! Provides deterministic signal generators, buffer comparison utilities
//! and proptest strategies for the estimator and mixer test suites.

pub mod comparison;
pub mod generators;
pub mod strategies;

pub use proptest;
pub use test_strategy;

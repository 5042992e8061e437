//! Randomness utilities for the generator

/// Seeded random selection
pub mod random;

//! Difficulty presets and layout measurements

/// Named difficulty tiers and their board presets
pub mod difficulty;
/// Descriptive statistics for finished layouts
pub mod statistics;

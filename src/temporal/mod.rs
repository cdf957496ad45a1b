//! Mapping a requested year onto observed frames.

/// Per-cell stochastic blending between two frames.
pub mod interpolate;
/// Bracketing-year resolution.
pub mod query;

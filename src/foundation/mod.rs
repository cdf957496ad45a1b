//! Shared vocabulary: dataset kinds, colors, errors and small integer math helpers.

/// Dataset kinds, overlay kinds and colors.
pub mod core;
/// Crate-wide error type.
pub mod error;
pub(crate) mod math;

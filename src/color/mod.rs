//! Cell value to color rules.
//!
//! Everything here is pure and total: sentinel, out-of-range and non-finite inputs always map to a
//! defined color, usually [`Rgba8::TRANSPARENT`](crate::Rgba8::TRANSPARENT).

/// Per-dataset lookups dispatching to the category/continuous rules.
pub mod mapping;
/// Built-in class tables, scales and no-data rules.
pub mod palette;

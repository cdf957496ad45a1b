//! Decoded raster frames and the memoizing store that owns them.
//!
//! Decoding itself happens behind [`RasterLoader`](crate::RasterLoader); the store only decides
//! when to call it and what to remember.

/// Raster frame model.
pub mod frame;
/// Coalescing `(dataset, year)` cache.
pub mod frame_store;
/// Loader boundary and the bundled JSON directory loader.
pub mod loader;
/// User-facing notice channel for load failures.
pub mod notice;

//! Turning resolved cell arrays into composited pixel buffers.
//!
//! Pipeline for one pass, see [`Compositor::render_frame`](crate::Compositor::render_frame):
//! 1. resolve the bracketing years for the active base dataset
//! 2. fetch both frames through the [`FrameStore`](crate::FrameStore)
//! 3. interpolate when the request falls between observations
//! 4. color-map every cell into a [`PixelBuffer`]
//! 5. draw enabled overlays on top in z-order
//! 6. summarize the same cell array that was color-mapped

/// Pixel buffer type.
pub mod buffer;
/// Per-pixel compositing and whole-layer drawing.
pub mod composite;
/// The render pipeline.
pub mod compositor;
/// Which layers are enabled.
pub mod state;

pub use buffer::PixelBuffer;

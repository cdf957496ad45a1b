//! Geolapse composites yearly geospatial rasters into pixel buffers.
//!
//! A request names a year and a [`CompositeState`] (one base dataset plus overlays). The engine:
//!
//! - resolves the year against the dataset's observation years ([`resolve_temporal_query`])
//! - loads the bracketing frames once through a coalescing [`FrameStore`]
//! - stipples between them ([`interpolate`]) and color-maps the result
//! - draws overlays on top and summarizes the base cells ([`FrameStats`])
//!
//! Year changes can be revealed progressively with a [`TransitionAnimator`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Progressive reveal between years.
pub mod animate;
/// Cell value to color rules.
pub mod color;
/// Engine configuration.
pub mod config;
/// Pixel buffers and the render pipeline.
pub mod render;
/// Pre-aggregated yearly tables.
pub mod series;
/// Frame statistics.
pub mod stats;
/// Frames, loaders and the frame cache.
pub mod store;
/// Year resolution and interpolation.
pub mod temporal;

pub use crate::foundation::core::{DatasetKind, OVERLAY_YEAR, OverlayKind, Rgba8, Year};
pub use crate::foundation::error::{GeoError, GeoResult};

pub use crate::animate::{
    Clock, ManualClock, Presentation, SystemClock, TickDraw, TickHandle, TransitionAnimator,
};
pub use crate::config::{EngineConfig, OverlayPalette, TRANSITION_DURATION_MS};
pub use crate::render::PixelBuffer;
pub use crate::render::compositor::{Compositor, MissingLayer, RenderOutput, ResolvedFrame};
pub use crate::render::state::CompositeState;
pub use crate::series::{LandCoverSeries, PrecipitationSeries};
pub use crate::stats::FrameStats;
pub use crate::store::frame::RasterFrame;
pub use crate::store::frame_store::{FrameKey, FrameStore, PreloadReport};
pub use crate::store::loader::{JsonDirLoader, MemoryLoader, RasterLoader};
pub use crate::store::notice::{Notice, NoticeLog, NoticeSink};
pub use crate::temporal::interpolate::{interpolate, interpolate_with_rng};
pub use crate::temporal::query::{TemporalQuery, resolve_temporal_query};

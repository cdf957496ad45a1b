use futures::future::join_all;
use rand::Rng;

use crate::color::mapping::ColorRules;
use crate::config::EngineConfig;
use crate::foundation::core::{DatasetKind, OVERLAY_YEAR, OverlayKind, Year};
use crate::foundation::error::GeoResult;
use crate::render::buffer::PixelBuffer;
use crate::render::composite::{CellView, color_map, draw_mask};
use crate::render::state::CompositeState;
use crate::stats::{FrameStats, compute_stats};
use crate::store::frame::RasterFrame;
use crate::store::frame_store::{FrameStore, PreloadReport};
use crate::temporal::interpolate::interpolate_with_rng;
use crate::temporal::query::{TemporalQuery, resolve_temporal_query};

/// Base-layer cells for one requested year, after interpolation and before coloring.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFrame {
    /// Dataset the cells belong to.
    pub kind: DatasetKind,
    /// Year that was asked for.
    pub year: Year,
    /// Bracketing years used.
    pub query: TemporalQuery,
    /// Row-major cells.
    pub cells: Vec<f64>,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Valid-data range for continuous kinds.
    pub range: Option<(f64, f64)>,
}

impl ResolvedFrame {
    /// Borrow as a color-mapping input.
    pub fn view(&self) -> CellView<'_> {
        CellView {
            kind: self.kind,
            cells: &self.cells,
            width: self.width,
            height: self.height,
            range: self.range,
        }
    }
}

/// A layer that could not be drawn in a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MissingLayer {
    /// Dataset of the layer.
    pub kind: DatasetKind,
    /// Year whose frame was unavailable.
    pub year: Year,
}

/// Result of [`Compositor::render_frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutput {
    /// Composited premultiplied pixels. Empty when neither base nor overlays were drawable.
    pub pixels: PixelBuffer,
    /// Statistics over the exact base cells that were color-mapped; `None` without a base layer.
    pub stats: Option<FrameStats>,
    /// Bracketing years of the base dataset.
    pub query: Option<TemporalQuery>,
    /// Layers that were skipped.
    pub missing: Vec<MissingLayer>,
}

impl RenderOutput {
    /// `true` when the base layer was drawn.
    pub fn has_base(&self) -> bool {
        self.stats.is_some()
    }
}

/// Turns a requested year and a [`CompositeState`] into pixels and statistics.
///
/// Missing frames never fail a render: the affected layer is skipped and listed in
/// [`RenderOutput::missing`].
#[derive(Debug)]
pub struct Compositor {
    store: FrameStore,
    rules: ColorRules,
    config: EngineConfig,
}

impl Compositor {
    /// Compositor with default color rules and configuration.
    pub fn new(store: FrameStore) -> Self {
        Self {
            store,
            rules: ColorRules::default(),
            config: EngineConfig::default(),
        }
    }

    /// Compositor with a validated configuration.
    pub fn with_config(store: FrameStore, config: EngineConfig) -> GeoResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            rules: ColorRules::default(),
            config,
        })
    }

    /// Replace the color rules.
    pub fn with_rules(mut self, rules: ColorRules) -> Self {
        self.rules = rules;
        self
    }

    /// Backing frame store.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Active color rules.
    pub fn rules(&self) -> &ColorRules {
        &self.rules
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Make `kind` the base dataset, preloading its years when it changed and preloading is on.
    pub async fn set_base_dataset(
        &self,
        state: &mut CompositeState,
        kind: DatasetKind,
    ) -> GeoResult<Option<PreloadReport>> {
        let changed = state.set_base_dataset(kind)?;
        if !changed || !self.config.preload_on_activate {
            return Ok(None);
        }
        Ok(Some(self.store.preload(kind).await))
    }

    /// Flip an overlay, fetching its frame when it becomes enabled. Returns whether it is enabled.
    pub async fn toggle_overlay(&self, state: &mut CompositeState, kind: OverlayKind) -> bool {
        let enabled = state.toggle_overlay(kind);
        if enabled && self.config.preload_on_activate {
            // Failures are reported by the store and surface again as missing layers.
            let _ = self
                .store
                .get_or_load(DatasetKind::Overlay(kind), OVERLAY_YEAR)
                .await;
        }
        enabled
    }

    /// Resolve base cells for `year` (bracket, fetch, interpolate). `None` means no data.
    pub async fn resolve_base(&self, kind: DatasetKind, year: Year) -> Option<ResolvedFrame> {
        let mut rng = rand::thread_rng();
        self.resolve_base_with_rng(kind, year, &mut rng).await
    }

    /// [`Compositor::resolve_base`] with a caller-supplied random source.
    pub async fn resolve_base_with_rng<R: Rng + ?Sized>(
        &self,
        kind: DatasetKind,
        year: Year,
        rng: &mut R,
    ) -> Option<ResolvedFrame> {
        self.resolve(kind, year, rng).await.0
    }

    /// Color-map `base` and draw every enabled overlay that is already cached.
    ///
    /// Synchronous: overlays are read with [`FrameStore::peek`], so this never waits on a load.
    /// Returns the buffer and the overlays that could not be drawn.
    pub fn paint(
        &self,
        base: Option<CellView<'_>>,
        state: &CompositeState,
    ) -> (PixelBuffer, Vec<MissingLayer>) {
        let mut pixels = base
            .map(|view| color_map(view, &self.rules))
            .unwrap_or_default();
        let mut missing = Vec::new();

        for overlay in state.enabled_overlays() {
            let kind = DatasetKind::Overlay(overlay);
            let drawn = self.store.peek(kind, OVERLAY_YEAR).is_some_and(|mask| {
                draw_mask(&mut pixels, &mask, self.config.overlay_colors.color(overlay))
            });
            if !drawn {
                missing.push(MissingLayer {
                    kind,
                    year: OVERLAY_YEAR,
                });
            }
        }
        (pixels, missing)
    }

    /// Full pipeline for `year` with the state's base dataset and overlays.
    pub async fn render_frame(&self, year: Year, state: &CompositeState) -> RenderOutput {
        let mut rng = rand::thread_rng();
        self.render_frame_with_rng(year, state, &mut rng).await
    }

    /// [`Compositor::render_frame`] with a caller-supplied random source.
    #[tracing::instrument(skip(self, state, rng), fields(base = %state.base()))]
    pub async fn render_frame_with_rng<R: Rng + ?Sized>(
        &self,
        year: Year,
        state: &CompositeState,
        rng: &mut R,
    ) -> RenderOutput {
        let kind = state.base();
        let overlay_loads = join_all(
            state
                .enabled_overlays()
                .map(|o| self.store.get_or_load(DatasetKind::Overlay(o), OVERLAY_YEAR)),
        );
        let ((resolved, mut missing), _) =
            futures::join!(self.resolve(kind, year, rng), overlay_loads);

        let (pixels, missing_overlays) = self.paint(resolved.as_ref().map(|r| r.view()), state);
        missing.extend(missing_overlays);

        let stats = resolved.as_ref().and_then(|r| {
            compute_stats(
                kind,
                &r.cells,
                self.rules.land_cover(),
                &self.config.demographics,
            )
        });
        for layer in &missing {
            tracing::debug!(
                kind = %layer.kind,
                year = layer.year,
                "layer skipped: no data for this frame"
            );
        }

        RenderOutput {
            pixels,
            stats,
            query: resolved
                .as_ref()
                .map(|r| r.query)
                .or_else(|| resolve_temporal_query(year, kind.available_years())),
            missing,
        }
    }

    async fn resolve<R: Rng + ?Sized>(
        &self,
        kind: DatasetKind,
        year: Year,
        rng: &mut R,
    ) -> (Option<ResolvedFrame>, Vec<MissingLayer>) {
        let Some(query) = resolve_temporal_query(year, kind.available_years()) else {
            return (None, vec![MissingLayer { kind, year }]);
        };

        let (before, after) = if query.is_exact() {
            (self.store.get_or_load(kind, query.before).await, None)
        } else {
            let (b, a) = futures::join!(
                self.store.get_or_load(kind, query.before),
                self.store.get_or_load(kind, query.after)
            );
            (b, Some(a))
        };

        let Ok(before) = before else {
            return (
                None,
                vec![MissingLayer {
                    kind,
                    year: query.before,
                }],
            );
        };

        let mut missing = Vec::new();
        let (cells, source, range) = match after {
            Some(Ok(after)) => {
                let cells = interpolate_with_rng(&before.cells, &after.cells, query.progress, rng);
                // Mismatched shapes fall back to the target frame.
                let source = if cells.len() == before.cells.len() {
                    &*before
                } else {
                    &*after
                };
                let (w, h) = (source.width, source.height);
                let range = union_range(&before, &after);
                (cells, (w, h), range)
            }
            Some(Err(_)) => {
                missing.push(MissingLayer {
                    kind,
                    year: query.after,
                });
                (
                    before.cells.clone(),
                    (before.width, before.height),
                    before.value_range(),
                )
            }
            None => (
                before.cells.clone(),
                (before.width, before.height),
                before.value_range(),
            ),
        };

        let resolved = ResolvedFrame {
            kind,
            year,
            query,
            cells,
            width: source.0,
            height: source.1,
            range,
        };
        (Some(resolved), missing)
    }
}

fn union_range(a: &RasterFrame, b: &RasterFrame) -> Option<(f64, f64)> {
    match (a.value_range(), b.value_range()) {
        (Some((alo, ahi)), Some((blo, bhi))) => Some((alo.min(blo), ahi.max(bhi))),
        (Some(r), None) | (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

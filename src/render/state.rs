use std::collections::BTreeSet;

use crate::foundation::core::{DatasetKind, OverlayKind};
use crate::foundation::error::{GeoError, GeoResult};

/// Which base dataset is active and which overlays are drawn on top.
///
/// Owned by the caller; render passes only read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeState {
    base: DatasetKind,
    overlays: BTreeSet<OverlayKind>,
}

impl Default for CompositeState {
    fn default() -> Self {
        Self::new(DatasetKind::LandCover)
    }
}

impl CompositeState {
    /// State with `base` active and no overlays. Overlay kinds fall back to land cover.
    pub fn new(base: DatasetKind) -> Self {
        Self {
            base: if base.is_overlay() {
                DatasetKind::LandCover
            } else {
                base
            },
            overlays: BTreeSet::new(),
        }
    }

    /// Active base dataset.
    pub fn base(&self) -> DatasetKind {
        self.base
    }

    /// Select a base dataset, deselecting the previous one. Returns `true` if it changed.
    pub fn set_base_dataset(&mut self, kind: DatasetKind) -> GeoResult<bool> {
        if kind.is_overlay() {
            return Err(GeoError::validation(format!(
                "{kind} is an overlay, not a base dataset"
            )));
        }
        let changed = self.base != kind;
        self.base = kind;
        Ok(changed)
    }

    /// Flip an overlay on or off. Returns whether it is now enabled.
    pub fn toggle_overlay(&mut self, kind: OverlayKind) -> bool {
        if self.overlays.remove(&kind) {
            false
        } else {
            self.overlays.insert(kind);
            true
        }
    }

    /// Enable or disable an overlay. Repeating the same call has no further effect.
    pub fn set_overlay(&mut self, kind: OverlayKind, enabled: bool) {
        if enabled {
            self.overlays.insert(kind);
        } else {
            self.overlays.remove(&kind);
        }
    }

    /// `true` if `kind` is enabled.
    pub fn is_overlay_enabled(&self, kind: OverlayKind) -> bool {
        self.overlays.contains(&kind)
    }

    /// Enabled overlays in draw order, bottom first.
    pub fn enabled_overlays(&self) -> impl Iterator<Item = OverlayKind> + '_ {
        OverlayKind::Z_ORDER
            .into_iter()
            .filter(|k| self.overlays.contains(k))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;

//! Engine configuration, loadable from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration.

use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{OverlayKind, Rgba8};
use crate::foundation::error::{GeoError, GeoResult};
use crate::stats::demographics::DemographicRatios;

/// Duration of the progressive reveal between two years. Fixed, not configurable.
pub const TRANSITION_DURATION_MS: f64 = 500.0;

/// Flat color per overlay kind (straight alpha).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayPalette {
    /// Region outlines.
    pub region_boundary: Rgba8,
    /// District outlines.
    pub district_boundary: Rgba8,
    /// Roads.
    pub road_network: Rgba8,
    /// Rivers.
    pub river_network: Rgba8,
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            region_boundary: Rgba8::opaque(40, 40, 40),
            district_boundary: Rgba8::opaque(120, 120, 120),
            road_network: Rgba8::opaque(214, 96, 34),
            river_network: Rgba8::opaque(30, 120, 220),
        }
    }
}

impl OverlayPalette {
    /// Color used for `kind`.
    pub fn color(&self, kind: OverlayKind) -> Rgba8 {
        match kind {
            OverlayKind::RegionBoundary => self.region_boundary,
            OverlayKind::DistrictBoundary => self.district_boundary,
            OverlayKind::RoadNetwork => self.road_network,
            OverlayKind::RiverNetwork => self.river_network,
        }
    }
}

/// Engine-wide settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ratios for the population breakdown.
    pub demographics: DemographicRatios,
    /// Overlay colors.
    pub overlay_colors: OverlayPalette,
    /// Load every available year when a base dataset becomes active.
    pub preload_on_activate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            demographics: DemographicRatios::default(),
            overlay_colors: OverlayPalette::default(),
            preload_on_activate: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GeoResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| GeoError::config(format!("invalid JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GeoResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check value ranges.
    pub fn validate(&self) -> GeoResult<()> {
        self.demographics.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

use crate::color::palette::{CategoryTable, ContinuousScale, SentinelRule};
use crate::foundation::core::{DatasetKind, Rgba8};

/// Exact category lookup, falling back to the table's no-data entry.
///
/// Non-integral or non-finite values are never a valid code and take the fallback too.
pub fn color_for_category(value: f64, table: &CategoryTable) -> Rgba8 {
    category_code(value)
        .and_then(|code| table.get(code))
        .unwrap_or_else(|| table.no_data())
}

/// Integral category code carried by a cell, if any.
pub fn category_code(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

/// Index into a scale of `len` stops for `value` within `[min, max]`.
///
/// `max == min` uses a denominator of 1. Out-of-range values clamp to the end stops.
pub fn scale_index(value: f64, min: f64, max: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let span = max - min;
    let denom = if span == 0.0 { 1.0 } else { span };
    let normalized = ((value - min) / denom).clamp(0.0, 1.0);
    let last = len - 1;
    if normalized.is_nan() {
        return 0;
    }
    ((normalized * last as f64).floor() as usize).min(last)
}

/// Color for a continuous value on `scale`, transparent for sentinel cells.
pub fn color_for_continuous(
    value: f64,
    min: f64,
    max: f64,
    scale: &ContinuousScale,
    sentinel: SentinelRule,
) -> Rgba8 {
    if sentinel.is_sentinel(value) || scale.stops.is_empty() {
        return Rgba8::TRANSPARENT;
    }
    scale.stops[scale_index(value, min, max, scale.stops.len())]
}

/// Per-dataset color rules for base layers.
///
/// Holds the category table so hot loops don't rebuild it per cell.
#[derive(Clone, Debug)]
pub struct ColorRules {
    land_cover: CategoryTable,
}

impl Default for ColorRules {
    fn default() -> Self {
        Self {
            land_cover: CategoryTable::land_cover(),
        }
    }
}

impl ColorRules {
    /// Rules using a custom land cover table.
    pub fn with_land_cover(land_cover: CategoryTable) -> Self {
        Self { land_cover }
    }

    /// The land cover category table.
    pub fn land_cover(&self) -> &CategoryTable {
        &self.land_cover
    }

    /// Color for one cell of a base dataset.
    ///
    /// `range` is the frame's valid-data range. Without one every valid value lands on the first
    /// stop. Overlay kinds are drawn with flat colors by the compositor and map to transparent here.
    pub fn color_for_cell(&self, kind: DatasetKind, value: f64, range: Option<(f64, f64)>) -> Rgba8 {
        match kind {
            DatasetKind::LandCover => color_for_category(value, &self.land_cover),
            DatasetKind::Overlay(_) => Rgba8::TRANSPARENT,
            DatasetKind::Precipitation | DatasetKind::Vegetation | DatasetKind::Population => {
                let Some(scale) = ContinuousScale::for_kind(kind) else {
                    return Rgba8::TRANSPARENT;
                };
                let (min, max) = range.unwrap_or((value, value));
                color_for_continuous(value, min, max, &scale, SentinelRule::for_kind(kind))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/mapping.rs"]
mod tests;

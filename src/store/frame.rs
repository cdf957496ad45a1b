use crate::foundation::core::DatasetKind;
use crate::foundation::math::cell_count;
use crate::stats::reducers::excluded_from_stats;

/// A decoded raster grid: row-major cells plus dimensions.
///
/// An empty `cells` vector marks a failed decode and is never composited.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RasterFrame {
    /// Row-major cell values.
    pub cells: Vec<f64>,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Smallest valid value (continuous datasets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_min: Option<f64>,
    /// Largest valid value (continuous datasets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_max: Option<f64>,
}

impl RasterFrame {
    /// Frame without a value range.
    pub fn new(cells: Vec<f64>, width: u32, height: u32) -> Self {
        Self {
            cells,
            width,
            height,
            value_min: None,
            value_max: None,
        }
    }

    /// `true` when the frame holds exactly `width * height` cells and at least one.
    pub fn is_usable(&self) -> bool {
        !self.cells.is_empty() && cell_count(self.width, self.height) == Some(self.cells.len())
    }

    /// Valid-data range, when both ends are known.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        Some((self.value_min?, self.value_max?))
    }

    /// Fill in `value_min`/`value_max` from valid cells for continuous kinds.
    ///
    /// Ranges the loader already provided are kept. Frames with no valid cells keep `None`.
    pub fn with_valid_range(mut self, kind: DatasetKind) -> Self {
        if !kind.is_continuous() || self.value_range().is_some() {
            return self;
        }
        let range = self
            .cells
            .iter()
            .copied()
            .filter(|&v| !excluded_from_stats(kind, v))
            .fold(None::<(f64, f64)>, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });
        if let Some((lo, hi)) = range {
            self.value_min = Some(lo);
            self.value_max = Some(hi);
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/frame.rs"]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use crate::color::palette::{PRECIPITATION_NO_DATA, VEGETATION_NO_DATA};
use crate::color::mapping::category_code;
use crate::foundation::core::DatasetKind;

/// Precipitation at or below this (mm) counts as no rainfall signal.
pub const PRECIPITATION_FLOOR: f64 = 0.1;
/// Vegetation index values at or above this are saturated/invalid.
pub const VEGETATION_CEILING: f64 = 3000.0;

/// Average, extremes and sum of the valid cells of a continuous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContinuousSummary {
    /// Mean of valid cells.
    pub average: f64,
    /// Smallest valid cell.
    pub min: f64,
    /// Largest valid cell.
    pub max: f64,
    /// Sum of valid cells.
    pub total: f64,
    /// Number of cells that passed the filter.
    pub valid_cells: usize,
}

/// Count occurrences of each known category. Unknown values are dropped.
///
/// Every known category is present in the result, zero when absent from `cells`.
pub fn categorical_histogram(cells: &[f64], known: &BTreeSet<i64>) -> BTreeMap<i64, u64> {
    let mut out: BTreeMap<i64, u64> = known.iter().map(|&k| (k, 0)).collect();
    for code in cells.iter().filter_map(|&v| category_code(v)) {
        if let Some(count) = out.get_mut(&code) {
            *count += 1;
        }
    }
    out
}

/// Reduce cells not rejected by `exclude`. An empty valid set yields the all-zero record.
pub fn continuous_summary(cells: &[f64], exclude: impl Fn(f64) -> bool) -> ContinuousSummary {
    let mut valid = cells.iter().copied().filter(|&v| v.is_finite() && !exclude(v));
    let Some(first) = valid.next() else {
        return ContinuousSummary::default();
    };

    let (mut min, mut max, mut total, mut n) = (first, first, first, 1usize);
    for v in valid {
        min = min.min(v);
        max = max.max(v);
        total += v;
        n += 1;
    }

    ContinuousSummary {
        average: total / n as f64,
        min,
        max,
        total,
        valid_cells: n,
    }
}

/// Dataset-specific rule for cells that must not enter statistics or valid ranges.
pub fn excluded_from_stats(kind: DatasetKind, v: f64) -> bool {
    if !v.is_finite() {
        return true;
    }
    match kind {
        DatasetKind::Precipitation => v <= PRECIPITATION_FLOOR || v == PRECIPITATION_NO_DATA,
        DatasetKind::Vegetation => v <= 0.0 || v >= VEGETATION_CEILING || v == VEGETATION_NO_DATA,
        DatasetKind::Population => v < 0.0,
        DatasetKind::LandCover | DatasetKind::Overlay(_) => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/reducers.rs"]
mod tests;

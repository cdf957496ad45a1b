//! Summary statistics for the active base frame.
//!
//! Reducers are pure. Statistics are always computed from the exact cell array that was
//! color-mapped in the same pass, never from overlays.

/// Fixed-ratio demographic projections.
pub mod demographics;
/// Histogram and continuous reducers.
pub mod reducers;

use std::collections::BTreeMap;

use crate::color::palette::CategoryTable;
use crate::foundation::core::DatasetKind;
use crate::stats::demographics::{DemographicBreakdown, DemographicRatios};
use crate::stats::reducers::{ContinuousSummary, categorical_histogram, continuous_summary};

/// Dataset-specific summary of one rendered frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameStats {
    /// Per-class cell counts.
    LandCover {
        /// Count per known class code, zero-filled.
        histogram: BTreeMap<i64, u64>,
        /// Most frequent class other than no-data, lowest code on ties.
        dominant: Option<i64>,
    },
    /// Precipitation or vegetation summary.
    Continuous {
        /// Dataset summarized.
        dataset: DatasetKind,
        /// Reduced values.
        summary: ContinuousSummary,
    },
    /// Population summary plus projected breakdown.
    Population {
        /// Reduced values.
        summary: ContinuousSummary,
        /// Fixed-ratio projection of the total.
        demographics: DemographicBreakdown,
    },
}

/// Compute the stats record for `kind` over `cells`.
///
/// Overlays never contribute statistics and yield `None`.
pub fn compute_stats(
    kind: DatasetKind,
    cells: &[f64],
    land_cover: &CategoryTable,
    ratios: &DemographicRatios,
) -> Option<FrameStats> {
    match kind {
        DatasetKind::LandCover => {
            let known = land_cover.codes().collect();
            let histogram = categorical_histogram(cells, &known);
            let dominant = histogram
                .iter()
                .filter(|(code, count)| **code != CategoryTable::NO_DATA_KEY && **count > 0)
                .fold(None::<(i64, u64)>, |best, (&code, &count)| match best {
                    Some((_, c)) if c >= count => best,
                    _ => Some((code, count)),
                })
                .map(|(code, _)| code);
            Some(FrameStats::LandCover {
                histogram,
                dominant,
            })
        }
        DatasetKind::Precipitation | DatasetKind::Vegetation => Some(FrameStats::Continuous {
            dataset: kind,
            summary: continuous_summary(cells, |v| reducers::excluded_from_stats(kind, v)),
        }),
        DatasetKind::Population => {
            let summary = continuous_summary(cells, |v| reducers::excluded_from_stats(kind, v));
            Some(FrameStats::Population {
                demographics: ratios.project(summary.total),
                summary,
            })
        }
        DatasetKind::Overlay(_) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/frame_stats.rs"]
mod tests;

use super::*;

#[test]
fn histogram_counts_known_and_zero_fills() {
    let known: BTreeSet<i64> = (0..=17).collect();
    let h = categorical_histogram(&[7.0, 7.0, 8.0, 0.0], &known);
    assert_eq!(h[&7], 2);
    assert_eq!(h[&8], 1);
    assert_eq!(h[&0], 1);
    assert_eq!(h[&9], 0);
    assert_eq!(h.len(), 18);
    assert_eq!(h.values().sum::<u64>(), 4);
}

#[test]
fn histogram_drops_unknown_values() {
    let known: BTreeSet<i64> = [1, 2].into_iter().collect();
    let h = categorical_histogram(&[1.0, 3.0, 2.5, f64::NAN, -1.0], &known);
    assert_eq!(h[&1], 1);
    assert_eq!(h[&2], 0);
    assert_eq!(h.len(), 2);
}

#[test]
fn empty_summary_is_all_zero() {
    let s = continuous_summary(&[], |_| false);
    assert_eq!(s, ContinuousSummary::default());
    assert_eq!(s.average, 0.0);
    assert_eq!(s.min, 0.0);
    assert_eq!(s.max, 0.0);
    assert_eq!(s.total, 0.0);
}

#[test]
fn fully_excluded_summary_is_all_zero() {
    let s = continuous_summary(&[-9999.0, 0.0, 0.05], |v| {
        excluded_from_stats(DatasetKind::Precipitation, v)
    });
    assert_eq!(s, ContinuousSummary::default());
}

#[test]
fn precipitation_summary_skips_dry_and_no_data_cells() {
    let cells = [-9999.0, 0.1, 100.0, 300.0, 0.0, 200.0];
    let s = continuous_summary(&cells, |v| {
        excluded_from_stats(DatasetKind::Precipitation, v)
    });
    assert_eq!(s.valid_cells, 3);
    assert_eq!(s.min, 100.0);
    assert_eq!(s.max, 300.0);
    assert_eq!(s.total, 600.0);
    assert_eq!(s.average, 200.0);
}

#[test]
fn vegetation_summary_skips_saturated_and_sentinel() {
    let cells = [65533.0, 3000.0, 0.0, 1500.0, 2500.0, -4.0];
    let s = continuous_summary(&cells, |v| excluded_from_stats(DatasetKind::Vegetation, v));
    assert_eq!(s.valid_cells, 2);
    assert_eq!(s.min, 1500.0);
    assert_eq!(s.max, 2500.0);
}

#[test]
fn population_keeps_zero_cells() {
    let cells = [-1.0, 0.0, 10.0];
    let s = continuous_summary(&cells, |v| excluded_from_stats(DatasetKind::Population, v));
    assert_eq!(s.valid_cells, 2);
    assert_eq!(s.min, 0.0);
    assert_eq!(s.total, 10.0);
    assert_eq!(s.average, 5.0);
}

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn equal_inputs_are_a_noop_for_any_progress() {
    let a = [7.0, 7.0, 9.0];
    for p in [0.0, 0.25, 0.5, 1.0] {
        assert_eq!(interpolate(&a, &a, p), vec![7.0, 7.0, 9.0]);
    }
}

#[test]
fn zero_progress_returns_start() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 2.0, 7.0, 8.0];
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(interpolate_with_rng(&a, &b, 0.0, &mut rng), a.to_vec());
    }
}

#[test]
fn full_progress_returns_end() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 2.0, 7.0, 8.0];
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(interpolate_with_rng(&a, &b, 1.0, &mut rng), b.to_vec());
    }
}

#[test]
fn differing_cell_follows_progress_probability() {
    let a = [10.0];
    let b = [20.0];
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let trials = 10_000;
    let hits = (0..trials)
        .filter(|_| interpolate_with_rng(&a, &b, 0.3, &mut rng)[0] == 20.0)
        .count();
    let frac = hits as f64 / trials as f64;
    assert!((frac - 0.3).abs() < 0.03, "fraction {frac}");
}

#[test]
fn zero_progress_never_picks_end_over_many_trials() {
    let a = [10.0, 11.0];
    let b = [20.0, 21.0];
    let hits = (0..10_000)
        .filter(|_| interpolate(&a, &b, 0.0) != a.to_vec())
        .count();
    assert_eq!(hits, 0);
}

#[test]
fn output_cells_come_from_either_input() {
    let a: Vec<f64> = (0..256).map(|i| (i % 5) as f64).collect();
    let b: Vec<f64> = (0..256).map(|i| (i % 7) as f64).collect();
    let out = interpolate(&a, &b, 0.5);
    assert_eq!(out.len(), a.len());
    for ((o, x), y) in out.iter().zip(&a).zip(&b) {
        assert!(o == x || o == y);
    }
}

#[test]
fn repeated_calls_are_not_memoized() {
    let a = vec![0.0; 512];
    let b = vec![1.0; 512];
    let first = interpolate(&a, &b, 0.5);
    let differs = (0..8).any(|_| interpolate(&a, &b, 0.5) != first);
    assert!(differs);
}

#[test]
fn shape_mismatch_falls_back_to_end() {
    assert_eq!(interpolate(&[1.0, 2.0], &[3.0], 0.5), vec![3.0]);
    assert_eq!(interpolate(&[], &[3.0], 0.5), vec![3.0]);
    assert_eq!(interpolate(&[1.0], &[], 0.5), Vec::<f64>::new());
}

#[test]
fn out_of_range_progress_is_clamped() {
    let a = [1.0, 2.0];
    let b = [3.0, 4.0];
    assert_eq!(interpolate(&a, &b, -3.0), a.to_vec());
    assert_eq!(interpolate(&a, &b, 7.0), b.to_vec());
    assert_eq!(interpolate(&a, &b, f64::NAN), a.to_vec());
}

#[test]
fn matching_nan_cells_stay_put() {
    let a = [f64::NAN, 1.0];
    let b = [f64::NAN, 1.0];
    let out = interpolate(&a, &b, 0.5);
    assert!(out[0].is_nan());
    assert_eq!(out[1], 1.0);
}

use super::*;
use crate::color::palette::{PRECIPITATION_NO_DATA, VEGETATION_NO_DATA};
use crate::foundation::core::OverlayKind;

#[test]
fn category_exact_lookup() {
    let table = CategoryTable::land_cover();
    assert_eq!(
        color_for_category(12.0, &table),
        Rgba8::opaque(0xc2, 0x4f, 0x44)
    );
    assert_eq!(
        color_for_category(17.0, &table),
        Rgba8::opaque(0x1c, 0x0d, 0xff)
    );
}

#[test]
fn unknown_category_falls_back_to_no_data_entry() {
    let table = CategoryTable::new([
        (0, Rgba8::opaque(1, 1, 1)),
        (5, Rgba8::opaque(5, 5, 5)),
    ]);
    assert_eq!(color_for_category(99.0, &table), Rgba8::opaque(1, 1, 1));
    assert_eq!(color_for_category(5.5, &table), Rgba8::opaque(1, 1, 1));
    assert_eq!(color_for_category(f64::NAN, &table), Rgba8::opaque(1, 1, 1));

    let no_zero = CategoryTable::new([(5, Rgba8::opaque(5, 5, 5))]);
    assert_eq!(color_for_category(4.0, &no_zero), Rgba8::TRANSPARENT);
}

#[test]
fn scale_index_is_monotonic_and_bounded() {
    let (min, max) = (-3.0, 17.5);
    let len = ContinuousScale::PRECIPITATION.stops.len();
    let mut prev = 0usize;
    let mut v = -50.0;
    while v <= 50.0 {
        let idx = scale_index(v, min, max, len);
        assert!(idx < len);
        assert!(idx >= prev, "index decreased at {v}");
        prev = idx;
        v += 0.125;
    }
    assert_eq!(scale_index(min, min, max, len), 0);
    assert_eq!(scale_index(max, min, max, len), len - 1);
}

#[test]
fn degenerate_range_does_not_divide_by_zero() {
    let scale = ContinuousScale::POPULATION;
    let c = color_for_continuous(42.0, 42.0, 42.0, &scale, SentinelRule::Negative);
    assert_eq!(c, scale.stops[0]);
    // With a unit denominator a value one above min saturates.
    let c = color_for_continuous(43.0, 42.0, 42.0, &scale, SentinelRule::Negative);
    assert_eq!(c, scale.stops[scale.stops.len() - 1]);
}

#[test]
fn vegetation_sentinel_is_transparent() {
    let rules = ColorRules::default();
    assert_eq!(
        rules.color_for_cell(
            DatasetKind::Vegetation,
            VEGETATION_NO_DATA,
            Some((0.0, 9000.0))
        ),
        Rgba8::TRANSPARENT
    );
    assert!(
        !rules
            .color_for_cell(DatasetKind::Vegetation, 4500.0, Some((0.0, 9000.0)))
            .is_transparent()
    );
}

#[test]
fn precipitation_sentinel_is_transparent() {
    let rules = ColorRules::default();
    assert_eq!(
        rules.color_for_cell(
            DatasetKind::Precipitation,
            PRECIPITATION_NO_DATA,
            Some((0.0, 800.0))
        ),
        Rgba8::TRANSPARENT
    );
}

#[test]
fn population_zero_is_a_value_but_negative_is_not() {
    let rules = ColorRules::default();
    let range = Some((0.0, 1000.0));
    assert_eq!(
        rules.color_for_cell(DatasetKind::Population, 0.0, range),
        ContinuousScale::POPULATION.stops[0]
    );
    assert_eq!(
        rules.color_for_cell(DatasetKind::Population, -1.0, range),
        Rgba8::TRANSPARENT
    );
}

#[test]
fn non_finite_continuous_values_are_transparent() {
    let scale = ContinuousScale::VEGETATION;
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            color_for_continuous(v, 0.0, 1.0, &scale, SentinelRule::None),
            Rgba8::TRANSPARENT
        );
    }
}

#[test]
fn overlay_kinds_have_no_base_color() {
    let rules = ColorRules::default();
    assert_eq!(
        rules.color_for_cell(DatasetKind::Overlay(OverlayKind::RoadNetwork), 1.0, None),
        Rgba8::TRANSPARENT
    );
}

#[test]
fn missing_range_maps_valid_values_to_first_stop() {
    let rules = ColorRules::default();
    assert_eq!(
        rules.color_for_cell(DatasetKind::Precipitation, 640.0, None),
        ContinuousScale::PRECIPITATION.stops[0]
    );
}

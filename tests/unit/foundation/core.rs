use super::*;

#[test]
fn annual_datasets_expose_fourteen_years() {
    for kind in [
        DatasetKind::LandCover,
        DatasetKind::Precipitation,
        DatasetKind::Vegetation,
    ] {
        let years = kind.available_years();
        assert_eq!(years.len(), 14);
        assert_eq!(years.first(), Some(&2010));
        assert_eq!(years.last(), Some(&2023));
        assert!(years.windows(2).all(|w| w[1] == w[0] + 1));
    }
}

#[test]
fn population_uses_census_years() {
    assert_eq!(
        DatasetKind::Population.available_years(),
        &[2010, 2015, 2020]
    );
}

#[test]
fn overlays_are_timeless() {
    let kind = DatasetKind::Overlay(OverlayKind::RoadNetwork);
    assert_eq!(kind.available_years(), &[OVERLAY_YEAR]);
    assert_eq!(kind.nearest_available_year(2017), OVERLAY_YEAR);
}

#[test]
fn nearest_year_prefers_closest_then_earlier() {
    let pop = DatasetKind::Population;
    assert_eq!(pop.nearest_available_year(2013), 2015);
    assert_eq!(pop.nearest_available_year(2012), 2010);
    // Equidistant between 2015 and 2020: the earlier wins.
    assert_eq!(pop.nearest_available_year(2017), 2015);
    assert_eq!(pop.nearest_available_year(2030), 2020);
    assert_eq!(pop.nearest_available_year(1990), 2010);
    assert_eq!(pop.nearest_available_year(2015), 2015);
}

#[test]
fn nearest_year_of_empty_list_is_none() {
    assert_eq!(nearest_year(&[], 2015), None);
}

#[test]
fn slug_roundtrip_covers_every_kind() {
    for kind in DatasetKind::BASE_KINDS
        .into_iter()
        .chain(OverlayKind::Z_ORDER.into_iter().map(DatasetKind::Overlay))
    {
        assert_eq!(DatasetKind::from_slug(kind.slug()), Some(kind));
    }
    assert_eq!(
        DatasetKind::from_slug(" Land_Cover "),
        Some(DatasetKind::LandCover)
    );
    assert_eq!(DatasetKind::from_slug("elevation"), None);
}

#[test]
fn z_order_matches_z_index() {
    for (i, kind) in OverlayKind::Z_ORDER.iter().enumerate() {
        assert_eq!(kind.z_index(), i);
    }
}

#[test]
fn continuous_flags() {
    assert!(!DatasetKind::LandCover.is_continuous());
    assert!(DatasetKind::Precipitation.is_continuous());
    assert!(DatasetKind::Population.is_continuous());
    assert!(DatasetKind::Overlay(OverlayKind::RiverNetwork).is_overlay());
}

#[test]
fn premultiply_scales_color_channels() {
    assert_eq!(
        Rgba8::new(200, 100, 50, 255).premultiplied(),
        [200, 100, 50, 255]
    );
    assert_eq!(Rgba8::new(200, 100, 50, 0).premultiplied(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::new(255, 0, 0, 128).premultiplied(), [128, 0, 0, 128]);
}

#[test]
fn rgba_serializes_as_array() {
    let json = serde_json::to_string(&Rgba8::opaque(1, 2, 3)).unwrap();
    assert_eq!(json, "[1,2,3,255]");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgba8::opaque(1, 2, 3));
}

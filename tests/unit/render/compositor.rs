use std::rc::Rc;

use futures::executor::block_on;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::color::palette::{CategoryTable, ContinuousScale};
use crate::store::loader::MemoryLoader;
use crate::store::notice::NoticeLog;

fn land(cells: &[f64]) -> RasterFrame {
    RasterFrame::new(cells.to_vec(), 2, 2)
}

fn compositor(loader: MemoryLoader) -> (Compositor, Rc<MemoryLoader>, Rc<NoticeLog>) {
    let loader = Rc::new(loader);
    let notices = Rc::new(NoticeLog::new());
    let store = FrameStore::with_notices(loader.clone(), notices.clone());
    (Compositor::new(store), loader, notices)
}

fn table_colors() -> Vec<[u8; 4]> {
    let table = CategoryTable::land_cover();
    table
        .codes()
        .filter_map(|c| table.get(c))
        .map(|c| {
            if c.a == 255 {
                c.to_array()
            } else {
                [0, 0, 0, 0]
            }
        })
        .collect()
}

#[test]
fn exact_year_uses_observed_cells() {
    let (c, _, _) = compositor(
        MemoryLoader::new().with(DatasetKind::LandCover, 2015, land(&[12.0, 12.0, 10.0, 0.0])),
    );
    let out = block_on(c.render_frame(2015, &CompositeState::default()));
    assert!(out.missing.is_empty());
    assert_eq!(out.query.map(|q| q.is_exact()), Some(true));
    assert_eq!((out.pixels.width, out.pixels.height), (2, 2));
    match out.stats {
        Some(FrameStats::LandCover {
            histogram,
            dominant,
        }) => {
            assert_eq!(histogram[&12], 2);
            assert_eq!(histogram[&10], 1);
            assert_eq!(histogram[&0], 1);
            assert_eq!(dominant, Some(12));
        }
        other => panic!("unexpected stats: {other:?}"),
    }
}

#[test]
fn annual_datasets_resolve_to_a_single_frame() {
    let (c, loader, _) = compositor(
        MemoryLoader::new()
            .with(DatasetKind::LandCover, 2012, land(&[1.0, 1.0, 1.0, 1.0]))
            .with(DatasetKind::LandCover, 2013, land(&[16.0, 16.0, 16.0, 16.0])),
    );
    let mut rng = StdRng::seed_from_u64(7);
    let r = block_on(c.resolve_base_with_rng(DatasetKind::LandCover, 2012, &mut rng))
        .expect("resolved");
    assert!(r.query.is_exact());
    assert!(r.cells.iter().all(|&v| v == 1.0));
    assert_eq!(loader.calls(), 1);
}

#[test]
fn population_interpolates_between_observed_years() {
    let pop = |v: f64| RasterFrame::new(vec![v; 4], 2, 2);
    let (c, _, _) = compositor(
        MemoryLoader::new()
            .with(DatasetKind::Population, 2010, pop(10.0))
            .with(DatasetKind::Population, 2015, pop(50.0)),
    );
    let mut rng = StdRng::seed_from_u64(11);
    let r = block_on(c.resolve_base_with_rng(DatasetKind::Population, 2013, &mut rng))
        .expect("resolved");
    assert_eq!((r.query.before, r.query.after), (2010, 2015));
    assert!((r.query.progress - 0.6).abs() < 1e-12);
    assert!(r.cells.iter().all(|&v| v == 10.0 || v == 50.0));
    // Union of both frames' valid ranges.
    assert_eq!(r.range, Some((10.0, 50.0)));
}

#[test]
fn missing_after_frame_falls_back_to_before() {
    let pop = |v: f64| RasterFrame::new(vec![v; 4], 2, 2);
    let (c, _, notices) =
        compositor(MemoryLoader::new().with(DatasetKind::Population, 2010, pop(10.0)));
    let state = CompositeState::new(DatasetKind::Population);
    let mut rng = StdRng::seed_from_u64(3);
    let out = block_on(c.render_frame_with_rng(2012, &state, &mut rng));

    assert!(out.has_base());
    assert_eq!(
        out.missing,
        vec![MissingLayer {
            kind: DatasetKind::Population,
            year: 2015
        }]
    );
    let stops = ContinuousScale::POPULATION.stops;
    assert!(out.pixels.pixels().all(|p| p == stops[0].to_array()));
    assert_eq!(notices.len(), 1);
}

#[test]
fn missing_base_still_draws_overlays() {
    let road = RasterFrame::new(vec![0.0, 1.0, 0.0, 1.0], 2, 2);
    let (c, _, _) = compositor(MemoryLoader::new().with(
        DatasetKind::Overlay(OverlayKind::RoadNetwork),
        OVERLAY_YEAR,
        road,
    ));
    let mut state = CompositeState::default();
    state.set_overlay(OverlayKind::RoadNetwork, true);

    let out = block_on(c.render_frame(2012, &state));
    assert!(!out.has_base());
    assert_eq!(out.missing.len(), 1);
    assert_eq!(out.missing[0].kind, DatasetKind::LandCover);
    assert_eq!(out.missing[0].year, 2012);

    let road_color = c
        .config()
        .overlay_colors
        .color(OverlayKind::RoadNetwork)
        .to_array();
    assert_eq!(out.pixels.pixel(0), Some([0, 0, 0, 0]));
    assert_eq!(out.pixels.pixel(1), Some(road_color));
}

#[test]
fn overlays_draw_in_z_order_over_base() {
    let (c, _, _) = compositor(
        MemoryLoader::new()
            .with(DatasetKind::LandCover, 2010, land(&[12.0; 4]))
            .with(
                DatasetKind::Overlay(OverlayKind::RiverNetwork),
                OVERLAY_YEAR,
                land(&[1.0, 1.0, 0.0, 0.0]),
            )
            .with(
                DatasetKind::Overlay(OverlayKind::RegionBoundary),
                OVERLAY_YEAR,
                land(&[1.0, 0.0, 1.0, 0.0]),
            ),
    );
    let mut state = CompositeState::default();
    state.set_overlay(OverlayKind::RiverNetwork, true);
    state.set_overlay(OverlayKind::RegionBoundary, true);

    let out = block_on(c.render_frame(2010, &state));
    let palette = c.config().overlay_colors;
    let river = palette.color(OverlayKind::RiverNetwork).to_array();
    let region = palette.color(OverlayKind::RegionBoundary).to_array();
    let base = CategoryTable::land_cover().get(12).map(|c| c.to_array());

    // River sits above region where both are features.
    assert_eq!(out.pixels.pixel(0), Some(river));
    assert_eq!(out.pixels.pixel(1), Some(river));
    assert_eq!(out.pixels.pixel(2), Some(region));
    assert_eq!(out.pixels.pixel(3), base);
    assert!(out.missing.is_empty());
}

#[test]
fn stats_match_the_cells_that_were_painted() {
    let pop = |v: f64| RasterFrame::new(vec![v; 16], 4, 4);
    let (c, _, _) = compositor(
        MemoryLoader::new()
            .with(DatasetKind::Population, 2015, pop(10.0))
            .with(DatasetKind::Population, 2020, pop(50.0)),
    );
    let state = CompositeState::new(DatasetKind::Population);
    let top = ContinuousScale::POPULATION.stops[8].to_array();
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = block_on(c.render_frame_with_rng(2017, &state, &mut rng));
        let high = out.pixels.pixels().filter(|p| *p == top).count() as f64;
        match out.stats {
            Some(FrameStats::Population { summary, .. }) => {
                assert_eq!(summary.total, 10.0 * (16.0 - high) + 50.0 * high);
            }
            other => panic!("unexpected stats: {other:?}"),
        }
    }
}

#[test]
fn rendered_land_cover_pixels_stay_inside_table() {
    let colors = table_colors();
    let (c, _, _) = compositor(
        MemoryLoader::new()
            .with(DatasetKind::LandCover, 2010, land(&[1.0, 5.0, 12.0, 0.0]))
            .with(DatasetKind::LandCover, 2015, land(&[2.0, 5.0, 13.0, 17.0])),
    );
    for year in [2010, 2015] {
        let out = block_on(c.render_frame(year, &CompositeState::default()));
        assert!(out.pixels.pixels().all(|p| colors.contains(&p)));
    }
}

#[test]
fn set_base_dataset_preloads_once() {
    let mut loader = MemoryLoader::new();
    for y in DatasetKind::Population.available_years() {
        loader = loader.with(DatasetKind::Population, *y, land(&[1.0; 4]));
    }
    let (c, _, _) = compositor(loader);
    let mut state = CompositeState::default();

    let report = block_on(c.set_base_dataset(&mut state, DatasetKind::Population))
        .unwrap()
        .expect("preloaded");
    assert_eq!(report.loaded, 3);
    assert!(report.failed.is_empty());
    assert!(c.store().is_cached(DatasetKind::Population, 2020));

    // Re-selecting the same base is a no-op.
    assert!(
        block_on(c.set_base_dataset(&mut state, DatasetKind::Population))
            .unwrap()
            .is_none()
    );
    assert!(
        block_on(c.set_base_dataset(
            &mut state,
            DatasetKind::Overlay(OverlayKind::RoadNetwork)
        ))
        .is_err()
    );
}

#[test]
fn toggle_overlay_fetches_when_enabled() {
    let (c, loader, _) = compositor(MemoryLoader::new().with(
        DatasetKind::Overlay(OverlayKind::DistrictBoundary),
        OVERLAY_YEAR,
        land(&[1.0; 4]),
    ));
    let mut state = CompositeState::default();
    assert!(block_on(c.toggle_overlay(&mut state, OverlayKind::DistrictBoundary)));
    assert!(c.store().is_cached(
        DatasetKind::Overlay(OverlayKind::DistrictBoundary),
        OVERLAY_YEAR
    ));
    assert!(!block_on(c.toggle_overlay(&mut state, OverlayKind::DistrictBoundary)));
    assert_eq!(loader.calls(), 1);
}

#[test]
fn paint_skips_uncached_overlays_without_loading() {
    let (c, loader, _) = compositor(MemoryLoader::new());
    let mut state = CompositeState::default();
    state.set_overlay(OverlayKind::RoadNetwork, true);
    let cells = [12.0; 4];
    let view = CellView {
        kind: DatasetKind::LandCover,
        cells: &cells,
        width: 2,
        height: 2,
        range: None,
    };
    let (pixels, missing) = c.paint(Some(view), &state);
    assert_eq!(pixels.pixel_count(), 4);
    assert_eq!(missing.len(), 1);
    assert_eq!(loader.calls(), 0);
}

#[test]
fn repeated_renders_of_a_missing_frame_notify_once() {
    let (c, _, notices) = compositor(MemoryLoader::new());
    let state = CompositeState::new(DatasetKind::Precipitation);
    for _ in 0..3 {
        let out = block_on(c.render_frame(2016, &state));
        assert!(!out.has_base());
    }
    assert_eq!(c.store().load_count(DatasetKind::Precipitation, 2016), 3);
    assert_eq!(notices.len(), 1);
}

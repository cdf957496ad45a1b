use std::fmt;

use crate::foundation::math::mul_div255_u8;

/// Observation year. Overlays are not time-varying and always use [`OVERLAY_YEAR`].
pub type Year = i32;

/// Year key used for every overlay frame.
pub const OVERLAY_YEAR: Year = 0;

const ANNUAL_YEARS: [Year; 14] = [
    2010, 2011, 2012, 2013, 2014, 2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023,
];
const CENSUS_YEARS: [Year; 3] = [2010, 2015, 2020];
const OVERLAY_YEARS: [Year; 1] = [OVERLAY_YEAR];

/// Vector-style overlay mask layers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Top-level administrative region outlines.
    RegionBoundary,
    /// District outlines.
    DistrictBoundary,
    /// Road network.
    RoadNetwork,
    /// River network.
    RiverNetwork,
}

impl OverlayKind {
    /// Fixed draw order, bottom first. Later entries paint over earlier ones.
    pub const Z_ORDER: [OverlayKind; 4] = [
        OverlayKind::RegionBoundary,
        OverlayKind::DistrictBoundary,
        OverlayKind::RoadNetwork,
        OverlayKind::RiverNetwork,
    ];

    /// Stable snake_case identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Self::RegionBoundary => "region_boundary",
            Self::DistrictBoundary => "district_boundary",
            Self::RoadNetwork => "road_network",
            Self::RiverNetwork => "river_network",
        }
    }

    /// Position in [`OverlayKind::Z_ORDER`].
    pub fn z_index(self) -> usize {
        match self {
            Self::RegionBoundary => 0,
            Self::DistrictBoundary => 1,
            Self::RoadNetwork => 2,
            Self::RiverNetwork => 3,
        }
    }
}

/// Closed set of datasets the engine knows how to color, summarize and animate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Discrete land cover class codes.
    LandCover,
    /// Annual precipitation in millimetres.
    Precipitation,
    /// Scaled vegetation index.
    Vegetation,
    /// Population count per cell.
    Population,
    /// Static vector overlay mask.
    Overlay(OverlayKind),
}

impl DatasetKind {
    /// Base (non-overlay) datasets in display order.
    pub const BASE_KINDS: [DatasetKind; 4] = [
        DatasetKind::LandCover,
        DatasetKind::Precipitation,
        DatasetKind::Vegetation,
        DatasetKind::Population,
    ];

    /// Stable snake_case identifier, also used as the on-disk directory name.
    pub fn slug(self) -> &'static str {
        match self {
            Self::LandCover => "land_cover",
            Self::Precipitation => "precipitation",
            Self::Vegetation => "vegetation",
            Self::Population => "population",
            Self::Overlay(o) => o.slug(),
        }
    }

    /// Parse a slug produced by [`DatasetKind::slug`].
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::BASE_KINDS
            .into_iter()
            .chain(OverlayKind::Z_ORDER.into_iter().map(Self::Overlay))
            .find(|k| k.slug() == slug)
    }

    /// `true` for datasets whose cells are continuous magnitudes.
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Self::Precipitation | Self::Vegetation | Self::Population
        )
    }

    /// `true` for vector overlay masks.
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Overlay(_))
    }

    /// Observation years for which frames exist, ascending and deduplicated.
    ///
    /// Land cover, precipitation and vegetation are annual over 2010..=2023. Population only
    /// exists for census years. Overlays have a single timeless frame.
    pub fn available_years(self) -> &'static [Year] {
        match self {
            Self::LandCover | Self::Precipitation | Self::Vegetation => &ANNUAL_YEARS,
            Self::Population => &CENSUS_YEARS,
            Self::Overlay(_) => &OVERLAY_YEARS,
        }
    }

    /// Snap `year` to the closest available year.
    ///
    /// Ties go to the earlier year: the scan keeps the first best candidate.
    pub fn nearest_available_year(self, year: Year) -> Year {
        nearest_year(self.available_years(), year).unwrap_or(year)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Closest member of `years` to `year`, ties resolved toward the earlier entry.
pub fn nearest_year(years: &[Year], year: Year) -> Option<Year> {
    years.iter().copied().reduce(|best, y| {
        if (y - year).abs() < (best - year).abs() {
            y
        } else {
            best
        }
    })
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `true` when alpha is zero.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiply color channels by alpha.
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

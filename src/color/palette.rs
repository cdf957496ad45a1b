use std::collections::BTreeMap;

use crate::foundation::core::{DatasetKind, Rgba8};

/// No-data marker written by the precipitation source.
pub const PRECIPITATION_NO_DATA: f64 = -9999.0;
/// No-data marker written by the vegetation source.
pub const VEGETATION_NO_DATA: f64 = 65533.0;

/// How a dataset marks cells that carry no value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SentinelRule {
    /// Only non-finite values are absent.
    None,
    /// One literal value is absent.
    Exact(f64),
    /// Strictly negative values are absent. Zero is a real value.
    Negative,
}

impl SentinelRule {
    /// `true` when `value` must be drawn transparent rather than placed on a scale.
    pub fn is_sentinel(self, value: f64) -> bool {
        if !value.is_finite() {
            return true;
        }
        match self {
            Self::None => false,
            Self::Exact(s) => value == s,
            Self::Negative => value < 0.0,
        }
    }

    /// Rule for a dataset kind.
    pub fn for_kind(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Precipitation => Self::Exact(PRECIPITATION_NO_DATA),
            DatasetKind::Vegetation => Self::Exact(VEGETATION_NO_DATA),
            DatasetKind::Population => Self::Negative,
            DatasetKind::LandCover | DatasetKind::Overlay(_) => Self::None,
        }
    }
}

/// One land cover class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandCoverClass {
    /// Raster code.
    pub code: i64,
    /// Display name.
    pub name: &'static str,
    /// Display color.
    pub color: Rgba8,
}

const fn class(code: i64, name: &'static str, color: Rgba8) -> LandCoverClass {
    LandCoverClass { code, name, color }
}

/// IGBP-style land cover classes. Code `0` is the no-data entry.
pub const LAND_COVER_CLASSES: [LandCoverClass; 18] = [
    class(0, "Unclassified", Rgba8::TRANSPARENT),
    class(1, "Evergreen Needleleaf Forest", Rgba8::opaque(0x05, 0x45, 0x0a)),
    class(2, "Evergreen Broadleaf Forest", Rgba8::opaque(0x08, 0x6a, 0x10)),
    class(3, "Deciduous Needleleaf Forest", Rgba8::opaque(0x54, 0xa7, 0x08)),
    class(4, "Deciduous Broadleaf Forest", Rgba8::opaque(0x78, 0xd2, 0x03)),
    class(5, "Mixed Forest", Rgba8::opaque(0x00, 0x99, 0x00)),
    class(6, "Closed Shrublands", Rgba8::opaque(0xc6, 0xb0, 0x44)),
    class(7, "Open Shrublands", Rgba8::opaque(0xdc, 0xd1, 0x59)),
    class(8, "Woody Savannas", Rgba8::opaque(0xda, 0xde, 0x48)),
    class(9, "Savannas", Rgba8::opaque(0xfb, 0xff, 0x13)),
    class(10, "Grasslands", Rgba8::opaque(0xb6, 0xff, 0x05)),
    class(11, "Permanent Wetlands", Rgba8::opaque(0x27, 0xff, 0x87)),
    class(12, "Croplands", Rgba8::opaque(0xc2, 0x4f, 0x44)),
    class(13, "Urban and Built-up", Rgba8::opaque(0xa5, 0xa5, 0xa5)),
    class(14, "Cropland/Natural Vegetation Mosaic", Rgba8::opaque(0xff, 0x6d, 0x4c)),
    class(15, "Snow and Ice", Rgba8::opaque(0x69, 0xff, 0xf8)),
    class(16, "Barren", Rgba8::opaque(0xf9, 0xff, 0xa4)),
    class(17, "Water Bodies", Rgba8::opaque(0x1c, 0x0d, 0xff)),
];

/// Name of a land cover code, if known.
pub fn land_cover_name(code: i64) -> Option<&'static str> {
    LAND_COVER_CLASSES
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.name)
}

/// Exact-match category color table with a designated no-data entry at key `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTable {
    entries: BTreeMap<i64, Rgba8>,
}

impl CategoryTable {
    /// Key holding the fallback color.
    pub const NO_DATA_KEY: i64 = 0;

    /// Build from `(code, color)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (i64, Rgba8)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The built-in land cover table.
    pub fn land_cover() -> Self {
        Self::new(LAND_COVER_CLASSES.iter().map(|c| (c.code, c.color)))
    }

    /// Color for an exact code.
    pub fn get(&self, code: i64) -> Option<Rgba8> {
        self.entries.get(&code).copied()
    }

    /// Fallback color; transparent if the table has no key `0`.
    pub fn no_data(&self) -> Rgba8 {
        self.get(Self::NO_DATA_KEY).unwrap_or(Rgba8::TRANSPARENT)
    }

    /// Known category codes, ascending.
    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }

    /// `true` when `color` is one of the table's colors.
    pub fn contains_color(&self, color: Rgba8) -> bool {
        self.entries.values().any(|c| *c == color)
    }
}

/// Ordered color ramp for continuous values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContinuousScale {
    /// Stops from low to high.
    pub stops: &'static [Rgba8],
}

const PRECIPITATION_STOPS: [Rgba8; 9] = [
    Rgba8::opaque(0xf7, 0xfb, 0xff),
    Rgba8::opaque(0xde, 0xeb, 0xf7),
    Rgba8::opaque(0xc6, 0xdb, 0xef),
    Rgba8::opaque(0x9e, 0xca, 0xe1),
    Rgba8::opaque(0x6b, 0xae, 0xd6),
    Rgba8::opaque(0x42, 0x92, 0xc6),
    Rgba8::opaque(0x21, 0x71, 0xb5),
    Rgba8::opaque(0x08, 0x51, 0x9c),
    Rgba8::opaque(0x08, 0x30, 0x6b),
];

const VEGETATION_STOPS: [Rgba8; 9] = [
    Rgba8::opaque(0x8c, 0x51, 0x0a),
    Rgba8::opaque(0xbf, 0x81, 0x2d),
    Rgba8::opaque(0xdf, 0xc2, 0x7d),
    Rgba8::opaque(0xf6, 0xe8, 0xc3),
    Rgba8::opaque(0xc7, 0xe9, 0xc0),
    Rgba8::opaque(0xa1, 0xd9, 0x9b),
    Rgba8::opaque(0x74, 0xc4, 0x76),
    Rgba8::opaque(0x31, 0xa3, 0x54),
    Rgba8::opaque(0x00, 0x6d, 0x2c),
];

const POPULATION_STOPS: [Rgba8; 9] = [
    Rgba8::opaque(0xff, 0xff, 0xcc),
    Rgba8::opaque(0xff, 0xed, 0xa0),
    Rgba8::opaque(0xfe, 0xd9, 0x76),
    Rgba8::opaque(0xfe, 0xb2, 0x4c),
    Rgba8::opaque(0xfd, 0x8d, 0x3c),
    Rgba8::opaque(0xfc, 0x4e, 0x2a),
    Rgba8::opaque(0xe3, 0x1a, 0x1c),
    Rgba8::opaque(0xbd, 0x00, 0x26),
    Rgba8::opaque(0x80, 0x00, 0x26),
];

impl ContinuousScale {
    /// Blue ramp.
    pub const PRECIPITATION: ContinuousScale = ContinuousScale {
        stops: &PRECIPITATION_STOPS,
    };
    /// Brown to green ramp.
    pub const VEGETATION: ContinuousScale = ContinuousScale {
        stops: &VEGETATION_STOPS,
    };
    /// Yellow to red ramp.
    pub const POPULATION: ContinuousScale = ContinuousScale {
        stops: &POPULATION_STOPS,
    };

    /// Scale for a continuous dataset kind.
    pub fn for_kind(kind: DatasetKind) -> Option<Self> {
        match kind {
            DatasetKind::Precipitation => Some(Self::PRECIPITATION),
            DatasetKind::Vegetation => Some(Self::VEGETATION),
            DatasetKind::Population => Some(Self::POPULATION),
            DatasetKind::LandCover | DatasetKind::Overlay(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;

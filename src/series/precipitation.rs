use std::path::Path;

use crate::foundation::core::Year;
use crate::foundation::error::GeoResult;
use crate::series::SeriesTable;

/// Regions in the built-in table.
pub const FALLBACK_REGIONS: [&str; 4] = ["north", "east", "south", "west"];

// Annual rainfall in mm, one column per entry of `FALLBACK_REGIONS`.
const FALLBACK_ROWS: [(Year, &[f64]); 14] = [
    (2010, &[182.0, 311.0, 604.0, 428.0]),
    (2011, &[141.0, 276.0, 552.0, 389.0]),
    (2012, &[205.0, 342.0, 661.0, 470.0]),
    (2013, &[168.0, 298.0, 587.0, 402.0]),
    (2014, &[157.0, 285.0, 569.0, 395.0]),
    (2015, &[133.0, 259.0, 521.0, 361.0]),
    (2016, &[176.0, 305.0, 598.0, 417.0]),
    (2017, &[189.0, 320.0, 615.0, 436.0]),
    (2018, &[214.0, 356.0, 676.0, 482.0]),
    (2019, &[171.0, 301.0, 590.0, 409.0]),
    (2020, &[228.0, 371.0, 702.0, 497.0]),
    (2021, &[162.0, 290.0, 575.0, 398.0]),
    (2022, &[195.0, 333.0, 640.0, 451.0]),
    (2023, &[179.0, 314.0, 608.0, 430.0]),
];

/// Yearly precipitation per region, in millimetres.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecipitationSeries {
    table: SeriesTable,
}

impl PrecipitationSeries {
    /// Read a `year,<region>...` CSV, falling back to the built-in table if it is missing.
    pub fn load(path: impl AsRef<Path>) -> GeoResult<Self> {
        SeriesTable::load_or(path.as_ref(), Self::fallback_table).map(|table| Self { table })
    }

    /// Parse CSV text.
    pub fn parse(text: &str) -> GeoResult<Self> {
        SeriesTable::parse(text, "precipitation").map(|table| Self { table })
    }

    /// The built-in table.
    pub fn fallback() -> Self {
        Self {
            table: Self::fallback_table(),
        }
    }

    fn fallback_table() -> SeriesTable {
        SeriesTable::from_static(&FALLBACK_REGIONS, &FALLBACK_ROWS)
    }

    /// Underlying table.
    pub fn table(&self) -> &SeriesTable {
        &self.table
    }

    /// Region names.
    pub fn regions(&self) -> &[String] {
        self.table.columns()
    }

    /// Years present, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.table.years()
    }

    /// Rainfall for `region` in `year`.
    pub fn value(&self, year: Year, region: &str) -> Option<f64> {
        self.table.value(year, region)
    }

    /// Sum over every region for `year`.
    pub fn total_for_year(&self, year: Year) -> Option<f64> {
        self.table.total_for_year(year)
    }

    /// Mean over regions for `year`.
    pub fn mean_for_year(&self, year: Year) -> Option<f64> {
        let n = self.table.columns().len();
        self.total_for_year(year).map(|t| t / n as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/series/precipitation.rs"]
mod tests;

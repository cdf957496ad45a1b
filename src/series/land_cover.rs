use std::path::Path;

use crate::foundation::core::Year;
use crate::foundation::error::GeoResult;
use crate::series::SeriesTable;

/// Classes in the built-in table, named as in the land-cover palette.
pub const FALLBACK_CLASSES: [&str; 6] = [
    "Grasslands",
    "Savannas",
    "Open Shrublands",
    "Croplands",
    "Barren",
    "Urban and Built-up",
];

// Cell counts per class, one column per entry of `FALLBACK_CLASSES`.
const FALLBACK_ROWS: [(Year, &[f64]); 3] = [
    (2010, &[41250.0, 18720.0, 30410.0, 9860.0, 52300.0, 610.0]),
    (2015, &[40110.0, 18150.0, 31020.0, 10940.0, 51980.0, 790.0]),
    (2020, &[38870.0, 17630.0, 31890.0, 12210.0, 51400.0, 1050.0]),
];

/// Yearly cell counts per land-cover class.
#[derive(Clone, Debug, PartialEq)]
pub struct LandCoverSeries {
    table: SeriesTable,
}

impl LandCoverSeries {
    /// Read a `year,<class>...` CSV, falling back to the built-in table if it is missing.
    pub fn load(path: impl AsRef<Path>) -> GeoResult<Self> {
        SeriesTable::load_or(path.as_ref(), Self::fallback_table).map(|table| Self { table })
    }

    /// Parse CSV text.
    pub fn parse(text: &str) -> GeoResult<Self> {
        SeriesTable::parse(text, "land cover").map(|table| Self { table })
    }

    /// The built-in table.
    pub fn fallback() -> Self {
        Self {
            table: Self::fallback_table(),
        }
    }

    fn fallback_table() -> SeriesTable {
        SeriesTable::from_static(&FALLBACK_CLASSES, &FALLBACK_ROWS)
    }

    /// Underlying table.
    pub fn table(&self) -> &SeriesTable {
        &self.table
    }

    /// Class names.
    pub fn classes(&self) -> &[String] {
        self.table.columns()
    }

    /// Years present, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.table.years()
    }

    /// Count for `class` in `year`.
    pub fn value(&self, year: Year, class: &str) -> Option<f64> {
        self.table.value(year, class)
    }

    /// Counted cells for `year`.
    pub fn total_for_year(&self, year: Year) -> Option<f64> {
        self.table.total_for_year(year)
    }

    /// Largest class for `year`; the first column wins ties.
    pub fn dominant_class(&self, year: Year) -> Option<&str> {
        self.table
            .row(year)?
            .fold(None::<(&str, f64)>, |best, (name, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((name, v)),
            })
            .map(|(name, _)| name)
    }

    /// Share of `class` in `year`'s total, in `[0, 1]`.
    pub fn share(&self, year: Year, class: &str) -> Option<f64> {
        let total = self.total_for_year(year)?;
        let v = self.value(year, class)?;
        Some(if total > 0.0 { v / total } else { 0.0 })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/series/land_cover.rs"]
mod tests;

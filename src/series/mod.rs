//! Pre-aggregated yearly tables read from small CSV files.
//!
//! Both tables share one layout: a header row starting with `year`, then one numeric row per
//! year. A missing file is not an error; the built-in fallback table is used instead.

/// Land-cover class counts per year.
pub mod land_cover;
/// Regional precipitation per year.
pub mod precipitation;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::foundation::core::Year;
use crate::foundation::error::{GeoError, GeoResult};

pub use land_cover::LandCoverSeries;
pub use precipitation::PrecipitationSeries;

/// Year-indexed numeric table with named columns.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesTable {
    columns: Vec<String>,
    rows: BTreeMap<Year, Vec<f64>>,
    fallback: bool,
}

impl SeriesTable {
    /// Parse CSV text. `source` only labels error messages.
    pub fn parse(text: &str, source: &str) -> GeoResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(GeoError::series(format!("{source}: empty table")));
        };
        let mut header = header.split(',').map(|c| c.trim().to_owned());
        if !header
            .next()
            .is_some_and(|first| first.eq_ignore_ascii_case("year"))
        {
            return Err(GeoError::series(format!(
                "{source}: first column must be 'year'"
            )));
        }
        let columns: Vec<String> = header.collect();
        if columns.is_empty() || columns.iter().any(|c| c.is_empty()) {
            return Err(GeoError::series(format!(
                "{source}: header needs at least one named value column"
            )));
        }

        let mut rows = BTreeMap::new();
        for (line, text) in lines {
            let fields: Vec<&str> = text.split(',').map(str::trim).collect();
            if fields.len() != columns.len() + 1 {
                return Err(GeoError::series(format!(
                    "{source}:{line}: expected {} fields, got {}",
                    columns.len() + 1,
                    fields.len()
                )));
            }
            let year: Year = fields[0].parse().map_err(|_| {
                GeoError::series(format!("{source}:{line}: bad year '{}'", fields[0]))
            })?;
            let values = fields[1..]
                .iter()
                .map(|f| match f.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(GeoError::series(format!("{source}:{line}: bad number '{f}'"))),
                })
                .collect::<GeoResult<Vec<f64>>>()?;
            if rows.insert(year, values).is_some() {
                return Err(GeoError::series(format!(
                    "{source}:{line}: duplicate year {year}"
                )));
            }
        }

        Ok(Self {
            columns,
            rows,
            fallback: false,
        })
    }

    /// Read `path`, or use `fallback` (marked as such) when the file does not exist.
    pub fn load_or(path: &Path, fallback: impl FnOnce() -> Self) -> GeoResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, &path.display().to_string()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "series file missing, using built-in table");
                let mut table = fallback();
                table.fallback = true;
                Ok(table)
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("read series '{}'", path.display()))
                .into()),
        }
    }

    fn from_static(columns: &[&str], rows: &[(Year, &[f64])]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            rows: rows.iter().map(|(y, v)| (*y, v.to_vec())).collect(),
            fallback: false,
        }
    }

    /// `true` when this is the built-in table rather than file data.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Value column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Years present, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.rows.keys().copied().collect()
    }

    /// Value for `year` in column `key`.
    pub fn value(&self, year: Year, key: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == key)?;
        self.rows.get(&year)?.get(idx).copied()
    }

    /// Sum of every column for `year`.
    pub fn total_for_year(&self, year: Year) -> Option<f64> {
        self.rows.get(&year).map(|r| r.iter().sum())
    }

    /// `(column, value)` pairs for `year`.
    pub fn row(&self, year: Year) -> Option<impl Iterator<Item = (&str, f64)> + '_> {
        let values = self.rows.get(&year)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied()),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/series/table.rs"]
mod tests;

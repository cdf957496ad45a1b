use crate::foundation::error::{GeoError, GeoResult};

/// Share of the population living in urban cells.
pub const URBAN_SHARE: f64 = 0.32;
/// Share aged 0 to 14.
pub const AGE_0_14_SHARE: f64 = 0.45;
/// Share aged 15 to 64.
pub const AGE_15_64_SHARE: f64 = 0.52;
/// Share aged 65 and over.
pub const AGE_65_PLUS_SHARE: f64 = 0.03;
/// Annual growth rate used for the one-year projection.
pub const ANNUAL_GROWTH_RATE: f64 = 0.029;

/// Fixed ratios applied to a population total. Not derived from data.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DemographicRatios {
    /// Urban share in `[0, 1]`; rural is the remainder.
    pub urban_share: f64,
    /// Age cohort 0-14.
    pub age_0_14: f64,
    /// Age cohort 15-64.
    pub age_15_64: f64,
    /// Age cohort 65+.
    pub age_65_plus: f64,
    /// Yearly growth rate.
    pub annual_growth_rate: f64,
}

impl Default for DemographicRatios {
    fn default() -> Self {
        Self {
            urban_share: URBAN_SHARE,
            age_0_14: AGE_0_14_SHARE,
            age_15_64: AGE_15_64_SHARE,
            age_65_plus: AGE_65_PLUS_SHARE,
            annual_growth_rate: ANNUAL_GROWTH_RATE,
        }
    }
}

impl DemographicRatios {
    /// Check every share is a fraction and the age cohorts partition the total.
    pub fn validate(&self) -> GeoResult<()> {
        for (name, v) in [
            ("urban_share", self.urban_share),
            ("age_0_14", self.age_0_14),
            ("age_15_64", self.age_15_64),
            ("age_65_plus", self.age_65_plus),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(GeoError::config(format!("{name} must be within [0, 1]")));
            }
        }
        let cohorts = self.age_0_14 + self.age_15_64 + self.age_65_plus;
        if (cohorts - 1.0).abs() > 1e-6 {
            return Err(GeoError::config(format!(
                "age cohort shares must sum to 1, got {cohorts}"
            )));
        }
        if !self.annual_growth_rate.is_finite() {
            return Err(GeoError::config("annual_growth_rate must be finite"));
        }
        Ok(())
    }

    /// Split `total` using these ratios.
    pub fn project(&self, total: f64) -> DemographicBreakdown {
        let urban = total * self.urban_share;
        DemographicBreakdown {
            total,
            urban,
            rural: total - urban,
            age_0_14: total * self.age_0_14,
            age_15_64: total * self.age_15_64,
            age_65_plus: total * self.age_65_plus,
            annual_growth_rate: self.annual_growth_rate,
            projected_next_year: total * (1.0 + self.annual_growth_rate),
        }
    }
}

/// Population breakdown derived from a total.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DemographicBreakdown {
    /// Population total the breakdown was derived from.
    pub total: f64,
    /// Urban population.
    pub urban: f64,
    /// Rural population.
    pub rural: f64,
    /// Aged 0-14.
    pub age_0_14: f64,
    /// Aged 15-64.
    pub age_15_64: f64,
    /// Aged 65+.
    pub age_65_plus: f64,
    /// Growth rate used for the projection.
    pub annual_growth_rate: f64,
    /// `total` grown by one year.
    pub projected_next_year: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/stats/demographics.rs"]
mod tests;

use crate::foundation::core::DatasetKind;

/// Convenience result alias used across the crate.
pub type GeoResult<T> = Result<T, GeoError>;

/// Crate-wide error type.
///
/// Render passes never return these for per-layer problems; they degrade to "render less" and
/// record the missing layer instead. Errors surface from explicit loads, configuration and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum GeoError {
    /// Input failed a structural check.
    #[error("validation error: {0}")]
    Validation(String),

    /// The loader could not produce a usable frame for a key.
    #[error("load error: {kind} @ {year}: {reason}")]
    Load {
        /// Dataset the load was for.
        kind: DatasetKind,
        /// Requested (normalized) year.
        year: i32,
        /// Human-readable failure reason.
        reason: String,
    },

    /// A frame needed by a render pass is not available.
    #[error("missing frame: {kind} @ {year}")]
    MissingFrame {
        /// Dataset of the missing frame.
        kind: DatasetKind,
        /// Year of the missing frame.
        year: i32,
    },

    /// Engine configuration is malformed or out of range.
    #[error("config error: {0}")]
    Config(String),

    /// A pre-aggregated series table could not be parsed.
    #[error("series error: {0}")]
    Series(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeoError {
    /// Build a [`GeoError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GeoError::Load`].
    pub fn load(kind: DatasetKind, year: i32, reason: impl Into<String>) -> Self {
        Self::Load {
            kind,
            year,
            reason: reason.into(),
        }
    }

    /// Build a [`GeoError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GeoError::Series`].
    pub fn series(msg: impl Into<String>) -> Self {
        Self::Series(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

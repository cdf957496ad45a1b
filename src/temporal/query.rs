use crate::foundation::core::Year;

/// Bracketing observation years for a requested year.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TemporalQuery {
    /// Latest available year `<=` the request.
    pub before: Year,
    /// Earliest available year `>=` the request.
    pub after: Year,
    /// Position between `before` and `after` in `[0, 1]`; `0` when they are equal.
    pub progress: f64,
}

impl TemporalQuery {
    /// `true` when a single observed frame covers the request.
    pub fn is_exact(&self) -> bool {
        self.before == self.after
    }
}

/// Resolve `requested` against ascending, deduplicated `years`.
///
/// Requests outside the covered range clamp to the nearest endpoint with zero progress.
/// Returns `None` only when `years` is empty.
pub fn resolve_temporal_query(requested: Year, years: &[Year]) -> Option<TemporalQuery> {
    let (&first, &last) = (years.first()?, years.last()?);

    if requested <= first || requested >= last {
        let y = if requested <= first { first } else { last };
        return Some(TemporalQuery {
            before: y,
            after: y,
            progress: 0.0,
        });
    }

    let before = years
        .iter()
        .copied()
        .filter(|&y| y <= requested)
        .max()
        .unwrap_or(first);
    let after = years
        .iter()
        .copied()
        .filter(|&y| y >= requested)
        .min()
        .unwrap_or(last);

    let progress = if before == after {
        0.0
    } else {
        f64::from(requested - before) / f64::from(after - before)
    };

    Some(TemporalQuery {
        before,
        after,
        progress,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/temporal/query.rs"]
mod tests;

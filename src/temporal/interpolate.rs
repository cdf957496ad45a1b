use rand::Rng;

/// Blend two same-shaped cell arrays with an independent Bernoulli draw per differing cell.
///
/// Cells equal in both inputs keep their value. Every other cell takes `end[i]` with probability
/// `progress`, otherwise `start[i]`. This is a stipple, not an average: averaged class codes
/// would be meaningless for categorical rasters. Calls are not memoized, so the same inputs
/// produce a different stipple each time.
///
/// Mismatched lengths or an empty input return `end` unchanged.
pub fn interpolate(start: &[f64], end: &[f64], progress: f64) -> Vec<f64> {
    interpolate_with_rng(start, end, progress, &mut rand::thread_rng())
}

/// [`interpolate`] with a caller-supplied random source.
pub fn interpolate_with_rng<R: Rng + ?Sized>(
    start: &[f64],
    end: &[f64],
    progress: f64,
    rng: &mut R,
) -> Vec<f64> {
    if start.len() != end.len() || start.is_empty() || end.is_empty() {
        return end.to_vec();
    }

    let p = clamp_progress(progress);
    start
        .iter()
        .zip(end)
        .map(|(&a, &b)| {
            // Bitwise equality also keeps matching NaN no-data cells stable.
            if a == b || a.to_bits() == b.to_bits() {
                a
            } else if rng.gen_bool(p) {
                b
            } else {
                a
            }
        })
        .collect()
}

/// Clamp to `[0, 1]`; NaN becomes `0`.
pub(crate) fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/temporal/interpolate.rs"]
mod tests;

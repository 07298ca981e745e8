//! NaN-aware summary statistics.
//!
//! Medial-wall vertices carry a NaN sentinel, so every moment computed over
//! surface data has to skip non-finite entries rather than poison the result.

/// Mean over the finite entries of `values`.
///
/// Returns 0.0 when no entry is finite.
#[must_use]
pub fn nan_mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = count as f64;
    sum / n
}

/// Population standard deviation over the finite entries of `values`.
///
/// Returns 0.0 when fewer than one entry is finite.
#[must_use]
pub fn nan_std(values: &[f64]) -> f64 {
    let mean = nan_mean(values);
    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v.is_finite() {
            let d = v - mean;
            sum_sq += d * d;
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = count as f64;
    (sum_sq / n).sqrt()
}

/// Rescales the finite entries of `values` in place to the target moments.
///
/// `values` is first centered and scaled to zero mean and unit standard
/// deviation, then shifted to `(target_mean, target_std)`. A zero source
/// standard deviation (constant input) leaves the spread at zero and only
/// shifts the mean. Non-finite entries are left untouched.
pub fn rescale_to_moments(values: &mut [f64], target_mean: f64, target_std: f64) {
    let mean = nan_mean(values);
    let std = nan_std(values);
    let scale = if std > 0.0 { target_std / std } else { 0.0 };
    for v in values.iter_mut() {
        if v.is_finite() {
            *v = (*v - mean) * scale + target_mean;
        }
    }
}

//! Small statistics helpers: quantiles, bootstrap intervals, multiple-testing
//! adjustment, and critical values.

use brierboard_core::constants::{NORMAL_CRITICAL_95, T_TABLE_MAX_DF};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Quantile of an ascending slice with linear interpolation between order statistics
/// (position `p · (n − 1)`). `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Sort a copy ascending and take the quantile.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}

/// Two-sided percentile interval at `level`.
pub fn percentile_interval(values: &[f64], level: f64) -> Option<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let tail = (1.0 - level) / 2.0;
    Some((
        quantile_sorted(&sorted, tail)?,
        quantile_sorted(&sorted, 1.0 - tail)?,
    ))
}

/// Bias-corrected percentile interval around the observed estimate.
///
/// The bias correction `z0 = Φ⁻¹(share of replicates below the estimate)` shifts both
/// percentile levels; the acceleration term is taken as zero. The share is clamped
/// away from 0 and 1 so `z0` stays finite.
pub fn bca_interval(values: &[f64], estimate: f64, level: f64) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let normal = Normal::new(0.0, 1.0).ok()?;
    let n = values.len() as f64;
    let below = values.iter().filter(|v| **v < estimate).count() as f64 / n;
    let clamp = 0.5 / n;
    let z0 = normal.inverse_cdf(below.clamp(clamp, 1.0 - clamp));

    let tail = (1.0 - level) / 2.0;
    let lower_level = normal.cdf(2.0 * z0 + normal.inverse_cdf(tail));
    let upper_level = normal.cdf(2.0 * z0 + normal.inverse_cdf(1.0 - tail));

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some((
        quantile_sorted(&sorted, lower_level)?,
        quantile_sorted(&sorted, upper_level)?,
    ))
}

/// Benjamini–Hochberg adjusted p-values, same order as the input.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_min = f64::INFINITY;
    for (rank, &i) in order.iter().enumerate().rev() {
        let candidate = p_values[i] * m as f64 / (rank + 1) as f64;
        running_min = running_min.min(candidate);
        adjusted[i] = running_min.min(1.0);
    }
    adjusted
}

/// Two-sided 95% critical value: Student-t with `df` degrees of freedom, or the normal
/// value above the table range.
pub fn t_critical_95(df: f64) -> f64 {
    if df.is_nan() || df <= 0.0 || df > T_TABLE_MAX_DF {
        return NORMAL_CRITICAL_95;
    }
    StudentsT::new(0.0, 1.0, df)
        .map(|t| t.inverse_cdf(0.975))
        .unwrap_or(NORMAL_CRITICAL_95)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_linear_interpolation() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert!((quantile(&v, 0.5).unwrap() - 2.5).abs() < 1e-12);
        assert!((quantile(&[4.0, 1.0, 3.0, 2.0], 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_percentile_interval_of_uniform_grid() {
        let v: Vec<f64> = (0..=100).map(f64::from).collect();
        let (lo, hi) = percentile_interval(&v, 0.95).unwrap();
        assert!((lo - 2.5).abs() < 1e-9);
        assert!((hi - 97.5).abs() < 1e-9);
    }

    #[test]
    fn test_bca_matches_percentile_when_unbiased() {
        let v: Vec<f64> = (0..=1000).map(|i| f64::from(i) / 1000.0).collect();
        let (lo, hi) = bca_interval(&v, 0.5, 0.95).unwrap();
        let (plo, phi) = percentile_interval(&v, 0.95).unwrap();
        assert!((lo - plo).abs() < 2e-3);
        assert!((hi - phi).abs() < 2e-3);
    }

    #[test]
    fn test_bca_shifts_toward_bias() {
        let v: Vec<f64> = (0..=1000).map(|i| f64::from(i) / 1000.0).collect();
        let (lo, _) = bca_interval(&v, 0.7, 0.95).unwrap();
        let (plo, _) = percentile_interval(&v, 0.95).unwrap();
        assert!(lo > plo);
    }

    #[test]
    fn test_benjamini_hochberg() {
        let adj = benjamini_hochberg(&[0.01, 0.04, 0.03, 0.5]);
        assert!((adj[0] - 0.04).abs() < 1e-12);
        assert!((adj[1] - 0.16 / 3.0).abs() < 1e-12);
        assert!((adj[2] - 0.16 / 3.0).abs() < 1e-12);
        assert!((adj[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_t_critical() {
        assert!((t_critical_95(1.0) - 12.706).abs() < 1e-3);
        assert!((t_critical_95(10.0) - 2.228).abs() < 1e-3);
        assert_eq!(t_critical_95(31.0), 1.96);
        assert_eq!(t_critical_95(0.0), 1.96);
    }
}

//! Small numeric helpers shared by the summaries, outlier rules and plots.

use std::collections::HashSet;

/// Quantile of already sorted values with linear interpolation between the
/// closest ranks (the pandas / numpy default).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Sorted copy of the present values.
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1). `NaN` below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Population standard deviation (n).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / values.len() as f64).sqrt()
}

/// Number of distinct present values.
pub fn distinct_count(values: &[Option<f64>]) -> usize {
    values
        .iter()
        .flatten()
        // fold -0.0 into 0.0 so both count once
        .map(|v| (v + 0.0).to_bits())
        .collect::<HashSet<u64>>()
        .len()
}

/// The `count / mean / std / min / quartiles / max` block of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn of(values: &[Option<f64>]) -> Self {
        let sorted = sorted_present(values);
        NumericSummary {
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Ordinary least squares line `y = slope * x + intercept`.
/// `None` when fewer than two points or all `x` are equal.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let my = points.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.0 - mx).powi(2)).sum();
    if sxx <= f64::EPSILON {
        return None;
    }
    let sxy: f64 = points.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn quantile_interpolates_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert!((quantile_sorted(&sorted, 0.25) - 2.75).abs() < TOL);
        assert!((quantile_sorted(&sorted, 0.75) - 6.25).abs() < TOL);
        assert!((quantile_sorted(&sorted, 0.5) - 4.5).abs() < TOL);
    }

    #[test]
    fn quantile_edges() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
        assert_eq!(quantile_sorted(&[3.0], 0.25), 3.0);
        assert_eq!(quantile_sorted(&[1.0, 9.0], 0.0), 1.0);
        assert_eq!(quantile_sorted(&[1.0, 9.0], 1.0), 9.0);
    }

    #[test]
    fn numeric_summary_skips_missing() {
        let s = NumericSummary::of(&[Some(2.0), None, Some(4.0), Some(6.0)]);
        assert_eq!(s.count, 3);
        assert!((s.mean - 4.0).abs() < TOL);
        assert!((s.std - 2.0).abs() < TOL);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.median, 4.0);
        assert_eq!(s.max, 6.0);
    }

    #[test]
    fn std_variants() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std(&v) - 2.0).abs() < TOL);
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn distinct_ignores_missing_and_duplicates() {
        assert_eq!(distinct_count(&[Some(1.0), Some(1.0), None, Some(2.5)]), 2);
        assert_eq!(distinct_count(&[Some(0.0), Some(-0.0)]), 1);
    }

    #[test]
    fn linear_fit_recovers_line() {
        let pts = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let (slope, intercept) = linear_fit(&pts).unwrap();
        assert!((slope - 2.0).abs() < TOL);
        assert!((intercept - 1.0).abs() < TOL);
        assert!(linear_fit(&[(1.0, 1.0), (1.0, 2.0)]).is_none());
    }
}

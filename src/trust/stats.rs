//! Per-column statistics.
//!
//! All statistics are computed over the non-missing values of one
//! normalized column. Anything that cannot be computed is reported as
//! `None` rather than NaN, so downstream classification can skip the
//! affected rules instead of propagating garbage.

// Statistical computation
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

/// Statistics for a single column.
///
/// Invariants: `missing_pct` is in [0, 100]; `iqr()` is ≥ 0 whenever the
/// quartiles exist; `outlier_count` never exceeds the non-missing count.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    /// Total row count.
    pub total_count: usize,
    /// Missing (or unparseable) cell count.
    pub missing_count: usize,
    /// Missing percentage of the total row count.
    pub missing_pct: f64,
    /// Arithmetic mean of the non-missing values.
    pub mean: Option<f64>,
    /// Median (50th percentile, interpolated).
    pub median: Option<f64>,
    /// Sample standard deviation (ddof = 1); `None` below 2 values.
    pub std_dev: Option<f64>,
    /// First quartile (25th percentile, interpolated).
    pub q1: Option<f64>,
    /// Third quartile (75th percentile, interpolated).
    pub q3: Option<f64>,
    /// Adjusted Fisher-Pearson skewness; `None` below 3 values or at
    /// ~zero variance.
    pub skewness: Option<f64>,
    /// Values beyond the Tukey fences.
    pub outlier_count: usize,
    /// Outlier percentage of the non-missing count; `None` when every
    /// cell is missing.
    pub outlier_pct: Option<f64>,
}

impl ColumnStats {
    /// Computes full statistics from a position-preserving value vector.
    ///
    /// `None` slots count as missing; everything else feeds the
    /// estimators.
    #[must_use]
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let total_count = values.len();
        let present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
        let missing_count = total_count - present.len();

        let missing_pct = percentage(missing_count, total_count);

        if present.is_empty() {
            return Self {
                total_count,
                missing_count,
                missing_pct,
                mean: None,
                median: None,
                std_dev: None,
                q1: None,
                q3: None,
                skewness: None,
                outlier_count: 0,
                outlier_pct: None,
            };
        }

        let n = present.len();
        let mean = present.iter().sum::<f64>() / n as f64;

        let mut sorted = present.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;

        let std_dev = sample_std(&present, mean);
        let skewness = adjusted_skewness(&present, mean);

        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;
        let outlier_count = present.iter().filter(|&&v| v < lower || v > upper).count();
        let outlier_pct = Some(percentage(outlier_count, n));

        Self {
            total_count,
            missing_count,
            missing_pct,
            mean: Some(mean),
            median: Some(median),
            std_dev,
            q1: Some(q1),
            q3: Some(q3),
            skewness,
            outlier_count,
            outlier_pct,
        }
    }

    /// Missing-rate-only statistics for identifier and categorical
    /// columns, which are exempt from numeric estimation.
    #[must_use]
    pub fn missing_only(total_count: usize, missing_count: usize) -> Self {
        Self {
            total_count,
            missing_count,
            missing_pct: percentage(missing_count, total_count),
            mean: None,
            median: None,
            std_dev: None,
            q1: None,
            q3: None,
            skewness: None,
            outlier_count: 0,
            outlier_pct: None,
        }
    }

    /// Interquartile range, Q3 − Q1.
    #[must_use]
    pub fn iqr(&self) -> Option<f64> {
        match (self.q1, self.q3) {
            (Some(q1), Some(q3)) => Some(q3 - q1),
            _ => None,
        }
    }

    /// Number of non-missing values.
    #[must_use]
    pub fn non_missing_count(&self) -> usize {
        self.total_count - self.missing_count
    }

    /// Lower Tukey fence, Q1 − 1.5·IQR.
    #[must_use]
    pub fn outlier_lower_bound(&self) -> Option<f64> {
        Some(self.q1? - 1.5 * self.iqr()?)
    }

    /// Upper Tukey fence, Q3 + 1.5·IQR.
    #[must_use]
    pub fn outlier_upper_bound(&self) -> Option<f64> {
        Some(self.q3? + 1.5 * self.iqr()?)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Interpolated quantile at position q·(n−1) over a sorted sample.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Sample standard deviation (ddof = 1); `None` below 2 values.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Adjusted Fisher-Pearson skewness, G1 = g1·√(n(n−1))/(n−2).
///
/// `None` below 3 values or when the variance is ~zero, so a constant
/// column never turns into NaN downstream.
fn adjusted_skewness(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / nf;

    if m2 <= f64::EPSILON {
        return None;
    }

    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

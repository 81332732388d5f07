//! Descriptive statistics toolkit.
//!
//! Consumed by the simulation statistics and exposed standalone. Variance
//! is population variance throughout; percentiles interpolate linearly
//! between order statistics. Empty input yields zeroed results, never an
//! error.

use serde::{Deserialize, Serialize};

/// Five-number descriptive summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptive {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// z-scores for the supported confidence levels; anything else falls back
/// to the 95% value.
fn z_score(level: f64) -> f64 {
    if (level - 0.90).abs() < 1e-9 {
        1.645
    } else if (level - 0.95).abs() < 1e-9 {
        1.96
    } else if (level - 0.99).abs() < 1e-9 {
        2.576
    } else {
        1.96
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64], mu: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64
}

/// Min/max/mean/median/std-dev of a sample.
pub fn describe(values: &[f64]) -> Descriptive {
    if values.is_empty() {
        return Descriptive::default();
    }
    let mu = mean(values);
    let std_dev = population_variance(values, mu).sqrt();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Descriptive {
        count: values.len(),
        min,
        max,
        mean: mu,
        median: percentile(values, 50.0),
        std_dev,
    }
}

/// p-th percentile (0..=100) with linear interpolation between order
/// statistics. 0 for an empty sample.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] * (1.0 - w) + sorted[hi] * w
    }
}

/// Confidence interval for the mean: `mean ± z·σ/√n`.
/// `(0, 0)` for an empty sample.
pub fn confidence_interval(values: &[f64], level: f64) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mu = mean(values);
    let sigma = population_variance(values, mu).sqrt();
    let half = z_score(level) * sigma / (values.len() as f64).sqrt();
    (mu - half, mu + half)
}

/// Third standardized moment. 0 for degenerate samples (σ = 0).
pub fn skewness(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let sigma = population_variance(values, mu).sqrt();
    if sigma == 0.0 {
        return 0.0;
    }
    let m3 = values.iter().map(|v| (v - mu).powi(3)).sum::<f64>() / values.len() as f64;
    m3 / sigma.powi(3)
}

/// Excess kurtosis: fourth standardized moment minus 3.
/// 0 for degenerate samples (σ = 0).
pub fn kurtosis(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = population_variance(values, mu);
    if variance == 0.0 {
        return 0.0;
    }
    let m4 = values.iter().map(|v| (v - mu).powi(4)).sum::<f64>() / values.len() as f64;
    m4 / (variance * variance) - 3.0
}

/// Values outside `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`, in input order.
pub fn find_outliers(values: &[f64]) -> Vec<f64> {
    if values.len() < 4 {
        return Vec::new();
    }
    let q1 = percentile(values, 25.0);
    let q3 = percentile(values, 75.0);
    let iqr = q3 - q1;
    let lo = q1 - 1.5 * iqr;
    let hi = q3 + 1.5 * iqr;
    values
        .iter()
        .copied()
        .filter(|&v| v < lo || v > hi)
        .collect()
}

/// Sample size for estimating a mean to `±margin`: `ceil((z·σ/margin)²)`.
/// `f64::INFINITY` when the margin is non-positive; 0 when σ is 0.
pub fn sample_size_needed(std_dev: f64, margin: f64, level: f64) -> f64 {
    if margin <= 0.0 {
        return f64::INFINITY;
    }
    if std_dev <= 0.0 {
        return 0.0;
    }
    (z_score(level) * std_dev / margin).powi(2).ceil()
}

//! Elementary statistics for the gallery charts.

use serde::{Deserialize, Serialize};

/// Quantile of ascending-sorted `sorted` using linear interpolation between
/// closest ranks (`p` in `[0, 1]`).
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    if !p.is_finite() {
        return None;
    }
    if p <= 0.0 || last == 0 {
        return sorted.first().copied();
    }
    if p >= 1.0 {
        return sorted.last().copied();
    }

    let rank = last as f64 * p;
    let lower = rank.floor() as usize;
    let low_value = sorted[lower];
    let high_value = sorted[(lower + 1).min(last)];
    Some(low_value + (high_value - low_value) * (rank - lower as f64))
}

#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Five-number summary with whiskers clamped at 1.5 IQR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub count: usize,
}

impl BoxSummary {
    /// Summarizes the finite values of `values`; `None` when there are none.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let min = *sorted.first()?;
        let max = *sorted.last()?;

        Some(Self {
            q1,
            median,
            q3,
            whisker_low: min.max(q1 - 1.5 * iqr),
            whisker_high: max.min(q3 + 1.5 * iqr),
            count: sorted.len(),
        })
    }

    #[must_use]
    pub fn iqr(self) -> f64 {
        self.q3 - self.q1
    }
}

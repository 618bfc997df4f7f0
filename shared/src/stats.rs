//! Time-series statistics over daily step counts
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no I/O, no clocks, no randomness
//! 2. **Total**: empty input and zero denominators yield neutral values
//! 3. **Population statistics**: the standard deviation divides by `n`

use crate::format::round_to;
use serde::{Deserialize, Serialize};

/// Relative change (percent) beyond which a window counts as trending
pub const TREND_THRESHOLD_PERCENT: f64 = 10.0;

// ============================================================================
// Descriptive statistics
// ============================================================================

/// Summary statistics of a step sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl StepStatistics {
    /// Compute statistics, `None` for an empty sequence
    pub fn from_steps(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let median = median(values)?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            median,
            std_dev: population_std_dev(values),
            min,
            max,
            count: values.len(),
        })
    }

    /// Consistency of the sequence on a 0-100 scale
    pub fn consistency(&self) -> f64 {
        consistency_score(self.mean, self.std_dev)
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, averaging the two middle values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation; zero for fewer than two values
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let Some(avg) = mean(values) else {
        return 0.0;
    };
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// `100 - min(100, stdev / mean * 100)` when mean > 0, else 0
///
/// Always within [0, 100].
pub fn consistency_score(mean: f64, std_dev: f64) -> f64 {
    if mean.is_nan() || mean <= 0.0 || !std_dev.is_finite() {
        return 0.0;
    }
    let variation = (std_dev / mean * 100.0).clamp(0.0, 100.0);
    100.0 - variation
}

// ============================================================================
// Trend detection
// ============================================================================

/// Direction of a metric across a window's two halves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::InsufficientData => "insufficient_data",
        }
    }
}

/// Result of comparing the earlier half of a window with the later half
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: Trend,
    /// Percent change from the earlier to the later half, one decimal
    pub change_percentage: f64,
    pub earlier_average: f64,
    pub later_average: f64,
    pub overall_average: f64,
    pub days_analyzed: usize,
}

impl TrendResult {
    fn insufficient(values: &[f64]) -> Self {
        Self {
            trend: Trend::InsufficientData,
            change_percentage: 0.0,
            earlier_average: 0.0,
            later_average: 0.0,
            overall_average: mean(values).map(f64::round).unwrap_or(0.0),
            days_analyzed: values.len(),
        }
    }
}

/// Percent change from `earlier` to `later`; zero when `earlier` is zero
pub fn percent_change(earlier: f64, later: f64) -> f64 {
    if earlier == 0.0 {
        return 0.0;
    }
    (later - earlier) * 100.0 / earlier
}

/// Compare the half means against the +/-10% bounds by cross-multiplying
/// the half sums, so a change of exactly 10% stays stable
///
/// Sums of whole step counts are exact in `f64`. `None` when the earlier
/// half sums to zero or below.
fn classify_halves(later: &[f64], earlier: &[f64]) -> Option<Trend> {
    let later_sum: f64 = later.iter().sum();
    let earlier_sum: f64 = earlier.iter().sum();
    if earlier_sum <= 0.0 {
        return (earlier_sum == 0.0).then_some(Trend::Stable);
    }

    let scaled_later = later_sum * earlier.len() as f64 * 10.0;
    let scaled_earlier = earlier_sum * later.len() as f64;
    let trend = if scaled_later > scaled_earlier * 11.0 {
        Trend::Increasing
    } else if scaled_later < scaled_earlier * 9.0 {
        Trend::Decreasing
    } else {
        Trend::Stable
    };
    Some(trend)
}

/// Classify a step sequence ordered most recent first
///
/// The window splits at `n / 2`: the later half is `[..mid]` and the
/// earlier half is `[mid..]`. A change strictly above 10% is increasing,
/// strictly below -10% decreasing, anything else stable.
pub fn detect_trend(values_most_recent_first: &[f64]) -> TrendResult {
    if values_most_recent_first.len() < 2 {
        return TrendResult::insufficient(values_most_recent_first);
    }

    let mid = values_most_recent_first.len() / 2;
    let (later, earlier) = values_most_recent_first.split_at(mid);
    let (Some(later_avg), Some(earlier_avg)) = (mean(later), mean(earlier)) else {
        return TrendResult::insufficient(values_most_recent_first);
    };

    let change = percent_change(earlier_avg, later_avg);
    let trend = classify_halves(later, earlier).unwrap_or_else(|| {
        if change > TREND_THRESHOLD_PERCENT {
            Trend::Increasing
        } else if change < -TREND_THRESHOLD_PERCENT {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    });

    TrendResult {
        trend,
        change_percentage: round_to(change, 1),
        earlier_average: earlier_avg.round(),
        later_average: later_avg.round(),
        overall_average: ((earlier_avg + later_avg) / 2.0).round(),
        days_analyzed: values_most_recent_first.len(),
    }
}

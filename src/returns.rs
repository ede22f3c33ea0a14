//! # Return Calculator
//!
//! $$
//! r_i = \frac{p_i - p_{i-1}}{p_{i-1}}
//! $$
//!
//! Converts a chronological close-price series into periodic simple
//! returns. Short histories are flagged low-confidence, never rejected.

/// Price observations below this count mark a series low-confidence.
pub const MIN_HISTORY_POINTS: usize = 30;

/// Periodic simple returns for one holding, with a data-quality flag.
#[derive(Clone, Debug, Default)]
pub struct ReturnSeries {
  /// Simple returns, one per consecutive price pair.
  pub returns: Vec<f64>,
  /// Set when the price history had fewer than [`MIN_HISTORY_POINTS`]
  /// observations.
  pub low_confidence: bool,
}

impl ReturnSeries {
  /// Number of return observations.
  pub fn len(&self) -> usize {
    self.returns.len()
  }

  /// True when no returns could be derived.
  pub fn is_empty(&self) -> bool {
    self.returns.is_empty()
  }
}

/// Convert close prices to a simple-return series.
///
/// Non-positive closes are skipped, so the output may be shorter than
/// `closes.len() - 1`.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
  let mut out = Vec::with_capacity(closes.len().saturating_sub(1));
  for i in 1..closes.len() {
    if closes[i - 1] > 0.0 && closes[i] > 0.0 {
      out.push((closes[i] - closes[i - 1]) / closes[i - 1]);
    }
  }
  out
}

/// Build a [`ReturnSeries`] from a close-price history.
pub fn return_series(closes: &[f64]) -> ReturnSeries {
  ReturnSeries {
    returns: simple_returns(closes),
    low_confidence: closes.len() < MIN_HISTORY_POINTS,
  }
}

//! # Risk/Return Estimator
//!
//! $$
//! \hat\mu = 252\,\bar r, \qquad \hat\sigma = \sqrt{252}\,s_r
//! $$
//!
//! Annualized expected return and volatility per holding, degrading to
//! conservative defaults when history is sparse.

use tracing::warn;

use crate::returns::ReturnSeries;

/// Trading periods per year for daily return series.
pub const PERIODS_PER_YEAR: f64 = 252.0;
/// Default annualized expected return under sparse data.
pub const DEFAULT_EXPECTED_RETURN: f64 = 0.07;
/// Default annualized volatility under sparse data.
pub const DEFAULT_VOLATILITY: f64 = 0.18;
/// Lower bound keeping volatility strictly positive.
pub const MIN_VOLATILITY: f64 = 1e-4;

/// Annualized risk/return estimate for one holding.
#[derive(Clone, Copy, Debug, Default)]
pub struct RiskProfile {
  /// Annualized expected return.
  pub expected_return: f64,
  /// Annualized volatility, floored at [`MIN_VOLATILITY`].
  pub volatility: f64,
}

fn sample_mean(xs: &[f64]) -> f64 {
  if xs.is_empty() {
    0.0
  } else {
    xs.iter().sum::<f64>() / xs.len() as f64
  }
}

fn sample_variance(xs: &[f64], mean: f64) -> f64 {
  if xs.len() < 2 {
    return 0.0;
  }

  let mut acc = 0.0;
  for &x in xs {
    let d = x - mean;
    acc += d * d;
  }
  acc / (xs.len() - 1) as f64
}

/// Estimate the annualized risk profile of one holding.
///
/// A low-confidence series (short price history or fewer than two
/// returns) yields [`DEFAULT_EXPECTED_RETURN`] / [`DEFAULT_VOLATILITY`]
/// instead of an estimate, logged with the holding id.
pub fn estimate_risk_profile(holding_id: &str, series: &ReturnSeries) -> RiskProfile {
  if series.low_confidence || series.len() < 2 {
    warn!(
      holding_id,
      observations = series.len(),
      "sparse return history, using conservative default estimates"
    );
    return RiskProfile {
      expected_return: DEFAULT_EXPECTED_RETURN,
      volatility: DEFAULT_VOLATILITY,
    };
  }

  let mean = sample_mean(&series.returns);
  let std_dev = sample_variance(&series.returns, mean).sqrt();

  RiskProfile {
    expected_return: mean * PERIODS_PER_YEAR,
    volatility: (std_dev * PERIODS_PER_YEAR.sqrt()).max(MIN_VOLATILITY),
  }
}

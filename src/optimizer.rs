//! # Sharpe Optimizer
//!
//! $$
//! f(\mathbf{w}) = -\frac{\mathbf{w}^\top\mu}{\sqrt{\mathbf{w}^\top\Sigma\mathbf{w}}}
//! $$
//!
//! Fixed-iteration gradient descent with momentum over unconstrained
//! weights. Feasibility (non-negative, sum to one) is restored once
//! after the loop; intermediate weights are free to leave the simplex.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use tracing::debug;

use crate::error::OptimizerError;

/// Objective value substituted when portfolio variance degenerates.
pub const INSTABILITY_PENALTY: f64 = 1e6;

const VARIANCE_EPS: f64 = 1e-12;

/// Gradient-descent hyperparameters.
#[derive(Clone, Copy, Debug)]
pub struct SharpeOptimizerConfig {
  /// Outer gradient iterations.
  pub iterations: usize,
  /// Step size per iteration.
  pub learning_rate: f64,
  /// Classical momentum coefficient on the velocity term.
  pub momentum: f64,
}

impl Default for SharpeOptimizerConfig {
  fn default() -> Self {
    Self {
      iterations: 1000,
      learning_rate: 0.01,
      momentum: 0.9,
    }
  }
}

/// Optimal weights and the portfolio statistics they imply.
#[derive(Clone, Debug, Default)]
pub struct SharpeOutcome {
  /// Non-negative weights summing to one.
  pub weights: Vec<f64>,
  /// Expected portfolio return at the final weights.
  pub expected_return: f64,
  /// Portfolio volatility at the final weights.
  pub volatility: f64,
  /// Sharpe ratio at the final weights, 0.0 for a degenerate portfolio.
  pub sharpe: f64,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn mat_vec_mul(mat: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
  mat
    .iter()
    .map(|row| row.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
    .collect()
}

/// Sharpe ratio and its gradient at `w`, with the degenerate-variance
/// guard substituting a large negative objective and a zero gradient.
fn sharpe_and_gradient(w: &[f64], mu: &[f64], cov: &[Vec<f64>]) -> (f64, Vec<f64>) {
  let sigma_w = mat_vec_mul(cov, w);
  let variance = dot(w, &sigma_w);

  if variance < VARIANCE_EPS {
    return (-INSTABILITY_PENALTY, vec![0.0; w.len()]);
  }

  let vol = variance.sqrt();
  let ret = dot(w, mu);
  let sharpe = ret / vol;

  // dS/dw_i = mu_i / sigma_p - (mu' w) (Sigma w)_i / sigma_p^3
  let grad = (0..w.len())
    .map(|i| mu[i] / vol - ret * sigma_w[i] / (vol * variance))
    .collect();

  (sharpe, grad)
}

/// Clamp negatives to zero and renormalize onto the unit simplex.
fn restore_feasibility(w: &[f64]) -> Vec<f64> {
  let n = w.len();
  let clamped: Vec<f64> = w.iter().map(|&x| x.max(0.0)).collect();
  let sum: f64 = clamped.iter().sum();

  if sum > 1e-12 {
    clamped.iter().map(|&x| x / sum).collect()
  } else {
    vec![1.0 / n as f64; n]
  }
}

/// Maximize the portfolio Sharpe ratio over the unit simplex.
///
/// `mu` holds annualized expected returns and `cov` the covariance
/// matrix built from correlations and per-asset volatilities.
/// Deterministic for fixed inputs and iteration count.
pub fn maximize_sharpe(
  mu: &[f64],
  cov: &[Vec<f64>],
  config: SharpeOptimizerConfig,
) -> Result<SharpeOutcome, OptimizerError> {
  maximize_sharpe_interruptible(mu, cov, config, &AtomicBool::new(false))
}

/// [`maximize_sharpe`] with a stop flag checked between outer iterations.
///
/// All working state is call-local, so stopping early leaves nothing to
/// clean up; the weights reached so far are normalized and returned.
pub fn maximize_sharpe_interruptible(
  mu: &[f64],
  cov: &[Vec<f64>],
  config: SharpeOptimizerConfig,
  stop: &AtomicBool,
) -> Result<SharpeOutcome, OptimizerError> {
  let n = mu.len();
  if n < 2 {
    return Err(OptimizerError::InsufficientHoldings(n));
  }

  let mut w = vec![1.0 / n as f64; n];
  let mut velocity = vec![0.0; n];
  let mut completed = 0usize;

  for _ in 0..config.iterations {
    if stop.load(Ordering::Relaxed) {
      debug!(completed, "sharpe optimization interrupted");
      break;
    }

    let (_, grad) = sharpe_and_gradient(&w, mu, cov);
    for i in 0..n {
      // Ascent on Sharpe, i.e. descent on the negated objective.
      velocity[i] = config.momentum * velocity[i] + config.learning_rate * grad[i];
      w[i] += velocity[i];
    }
    completed += 1;
  }

  let weights = restore_feasibility(&w);

  let sigma_w = mat_vec_mul(cov, &weights);
  let variance = dot(&weights, &sigma_w).max(0.0);
  let volatility = variance.sqrt();
  let expected_return = dot(&weights, mu);
  let sharpe = if volatility > 1e-15 {
    expected_return / volatility
  } else {
    0.0
  };

  debug!(
    iterations = completed,
    sharpe, expected_return, volatility, "sharpe optimization finished"
  );

  Ok(SharpeOutcome {
    weights,
    expected_return,
    volatility,
    sharpe,
  })
}

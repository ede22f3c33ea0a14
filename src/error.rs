//! # Errors
//!
//! $$
//! n_{\text{holdings}} \ge 2
//! $$
//!
//! Structural failures that abort an optimization request. Numeric
//! anomalies never surface here; they are absorbed by penalty
//! substitution inside the optimizer.

use thiserror::Error;

/// Validation failures raised before any numerical work begins.
#[derive(Debug, Error)]
pub enum OptimizerError {
  /// Optimization is undefined for portfolios of fewer than two holdings.
  #[error("portfolio optimization requires at least 2 holdings, got {0}")]
  InsufficientHoldings(usize),
  /// Every holding in the request lacked return data.
  #[error("no usable return data for any holding in the portfolio")]
  NoUsableReturns,
}

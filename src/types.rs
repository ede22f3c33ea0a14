//! # Core Types
//!
//! $$
//! \mathbf{w}^\*=\arg\max_{\mathbf{w}\ge 0,\ \sum_i w_i=1} \frac{\mathbf{w}^\top\mu}{\sigma_p}
//! $$
//!
//! Holdings snapshot, request parameters and result containers shared by
//! the optimization pipeline.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// One position in a portfolio snapshot, loaded fresh per request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Holding {
  /// Holding identifier.
  pub id: String,
  /// Traded symbol used to fetch price history.
  pub symbol: String,
  /// Asset class label (e.g. "equity", "bond").
  pub asset_class: String,
  /// Sector label.
  pub sector: String,
  /// Units held.
  pub quantity: f64,
  /// Current market value of the position.
  pub market_value: f64,
  /// Total acquisition cost of the position.
  pub total_cost: f64,
}

/// Close-price observation supplied by the price-history collaborator.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct PricePoint {
  /// Observation date.
  pub date: NaiveDate,
  /// Closing price.
  pub close: f64,
}

/// Investor risk tolerance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
  Conservative,
  #[default]
  Moderate,
  Aggressive,
}

impl RiskTolerance {
  /// Parse a string into a [`RiskTolerance`].
  pub fn from_str(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "conservative" => Self::Conservative,
      "aggressive" => Self::Aggressive,
      _ => Self::Moderate,
    }
  }

  /// Risk-aversion coefficient reported alongside results.
  ///
  /// Carried as metadata for downstream display; not folded into the
  /// optimization objective.
  pub fn risk_aversion(&self) -> f64 {
    match self {
      Self::Conservative => 4.0,
      Self::Moderate => 2.0,
      Self::Aggressive => 1.0,
    }
  }
}

/// Parameters of one optimization request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OptimizationRequest {
  /// Investor risk tolerance.
  pub risk_tolerance: RiskTolerance,
  /// Optional target return; accepted but not enforced (extension point).
  pub target_return: Option<f64>,
  /// Optional named constraints; accepted but not enforced beyond
  /// sum-to-one and non-negativity (extension point).
  #[serde(default)]
  pub constraints: HashMap<String, f64>,
}

/// Output of one optimization run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OptimizationResult {
  /// Optimal weights keyed by holding id, summing to one.
  pub weights: Vec<(String, f64)>,
  /// Annualized expected portfolio return.
  pub expected_return: f64,
  /// Annualized expected portfolio volatility.
  pub expected_volatility: f64,
  /// Sharpe ratio implied by the final weights.
  pub sharpe_ratio: f64,
  /// Risk-aversion coefficient derived from the request's tolerance.
  pub risk_aversion: f64,
}

/// Trade direction of a rebalancing recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
  Buy,
  Sell,
}

/// Urgency of a rebalancing recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  High,
  Medium,
}

/// Single actionable trade derived from the current/optimal weight gap.
#[derive(Clone, Debug, Serialize)]
pub struct RebalancingRecommendation {
  /// Holding identifier.
  pub holding_id: String,
  /// Trade direction.
  pub action: TradeAction,
  /// Weight implied by current market values.
  pub current_weight: f64,
  /// Weight returned by the optimizer.
  pub optimal_weight: f64,
  /// Trade size in portfolio currency.
  pub amount: f64,
  /// Recommendation urgency.
  pub priority: Priority,
}

/// Concentration metrics and allocation breakdown over optimal weights.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiversificationAnalysis {
  /// Optimal weight aggregated per asset class.
  pub by_asset_class: HashMap<String, f64>,
  /// Optimal weight aggregated per sector.
  pub by_sector: HashMap<String, f64>,
  /// Herfindahl-Hirschman concentration index.
  pub herfindahl_index: f64,
  /// Largest single-holding weight.
  pub concentration_ratio: f64,
  /// `1 - herfindahl_index`.
  pub diversification_score: f64,
}

/// Full response of one portfolio analysis request.
#[derive(Clone, Debug, Serialize)]
pub struct PortfolioReport {
  /// Optimal allocation and its portfolio statistics.
  pub result: OptimizationResult,
  /// Trades ordered by descending weight deviation.
  pub recommendations: Vec<RebalancingRecommendation>,
  /// Concentration and allocation breakdown.
  pub diversification: DiversificationAnalysis,
}

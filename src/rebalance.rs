//! # Rebalancing Recommendations
//!
//! $$
//! \Delta_i = w_i^\* - w_i^{\text{cur}}
//! $$
//!
//! Diffs current against optimal weights into prioritized trade actions,
//! largest deviation first.

use crate::types::Holding;
use crate::types::Priority;
use crate::types::RebalancingRecommendation;
use crate::types::TradeAction;

/// Minimum weight deviation (fractional) that triggers a recommendation.
pub const MATERIALITY_THRESHOLD: f64 = 0.05;
/// Deviation above which a recommendation is high priority.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 0.10;

/// Current portfolio weights implied by market values.
pub fn current_weights(holdings: &[Holding]) -> Vec<f64> {
  let total: f64 = holdings.iter().map(|h| h.market_value).sum();
  if total <= 0.0 {
    return vec![0.0; holdings.len()];
  }

  holdings.iter().map(|h| h.market_value / total).collect()
}

/// Generate trade recommendations for every holding whose weight
/// deviates from optimal by more than [`MATERIALITY_THRESHOLD`].
pub fn build_recommendations(
  holdings: &[Holding],
  optimal_weights: &[f64],
) -> Vec<RebalancingRecommendation> {
  let total: f64 = holdings.iter().map(|h| h.market_value).sum();
  let current = current_weights(holdings);

  let mut out = Vec::new();
  for (i, holding) in holdings.iter().enumerate() {
    let optimal = optimal_weights.get(i).copied().unwrap_or(0.0);
    let diff = optimal - current[i];
    if diff.abs() <= MATERIALITY_THRESHOLD {
      continue;
    }

    out.push(RebalancingRecommendation {
      holding_id: holding.id.clone(),
      action: if diff > 0.0 {
        TradeAction::Buy
      } else {
        TradeAction::Sell
      },
      current_weight: current[i],
      optimal_weight: optimal,
      amount: diff.abs() * total,
      priority: if diff.abs() > HIGH_PRIORITY_THRESHOLD {
        Priority::High
      } else {
        Priority::Medium
      },
    });
  }

  out.sort_by(|a, b| {
    let da = (a.optimal_weight - a.current_weight).abs();
    let db = (b.optimal_weight - b.current_weight).abs();
    db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
  });

  out
}

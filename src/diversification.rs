//! # Diversification Analyzer
//!
//! $$
//! H = \sum_i w_i^2, \qquad \text{score} = 1 - H
//! $$
//!
//! Concentration metrics and allocation breakdown over optimal weights.

use std::collections::HashMap;

use crate::types::DiversificationAnalysis;
use crate::types::Holding;

/// Herfindahl-Hirschman concentration index of a weight vector.
pub fn herfindahl_index(weights: &[f64]) -> f64 {
  weights.iter().map(|w| w * w).sum()
}

/// Analyze concentration and per-class/per-sector allocation of the
/// optimal weights.
pub fn analyze_diversification(holdings: &[Holding], weights: &[f64]) -> DiversificationAnalysis {
  let mut by_asset_class: HashMap<String, f64> = HashMap::new();
  let mut by_sector: HashMap<String, f64> = HashMap::new();

  for (holding, &w) in holdings.iter().zip(weights.iter()) {
    *by_asset_class.entry(holding.asset_class.clone()).or_insert(0.0) += w;
    *by_sector.entry(holding.sector.clone()).or_insert(0.0) += w;
  }

  let h = herfindahl_index(weights);

  DiversificationAnalysis {
    by_asset_class,
    by_sector,
    herfindahl_index: h,
    concentration_ratio: weights.iter().copied().fold(0.0, f64::max),
    diversification_score: 1.0 - h,
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  fn holding(id: &str, asset_class: &str, sector: &str) -> Holding {
    Holding {
      id: id.to_string(),
      symbol: id.to_string(),
      asset_class: asset_class.to_string(),
      sector: sector.to_string(),
      quantity: 1.0,
      market_value: 100.0,
      total_cost: 100.0,
    }
  }

  #[test]
  fn equal_weights_give_one_over_n() {
    let n = 4;
    let weights = vec![1.0 / n as f64; n];

    assert_relative_eq!(herfindahl_index(&weights), 1.0 / n as f64, epsilon = 1e-12);
  }

  #[test]
  fn fully_concentrated_portfolio_scores_zero() {
    let weights = vec![1.0, 0.0, 0.0];
    let holdings = vec![
      holding("a", "equity", "tech"),
      holding("b", "equity", "health"),
      holding("c", "bond", "govt"),
    ];

    let analysis = analyze_diversification(&holdings, &weights);

    assert_relative_eq!(analysis.herfindahl_index, 1.0, epsilon = 1e-12);
    assert_relative_eq!(analysis.diversification_score, 0.0, epsilon = 1e-12);
    assert_relative_eq!(analysis.concentration_ratio, 1.0, epsilon = 1e-12);
  }

  #[test]
  fn aggregates_by_asset_class_and_sector() {
    let holdings = vec![
      holding("a", "equity", "tech"),
      holding("b", "equity", "health"),
      holding("c", "bond", "govt"),
    ];
    let weights = vec![0.5, 0.3, 0.2];

    let analysis = analyze_diversification(&holdings, &weights);

    assert_relative_eq!(analysis.by_asset_class["equity"], 0.8, epsilon = 1e-12);
    assert_relative_eq!(analysis.by_asset_class["bond"], 0.2, epsilon = 1e-12);
    assert_relative_eq!(analysis.by_sector["tech"], 0.5, epsilon = 1e-12);
    assert_relative_eq!(analysis.by_sector["health"], 0.3, epsilon = 1e-12);
    assert_relative_eq!(analysis.by_sector["govt"], 0.2, epsilon = 1e-12);
    assert_relative_eq!(analysis.concentration_ratio, 0.5, epsilon = 1e-12);
    assert_relative_eq!(
      analysis.diversification_score,
      1.0 - (0.25 + 0.09 + 0.04),
      epsilon = 1e-12
    );
  }
}

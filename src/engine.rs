//! # Optimizer Engine
//!
//! $$
//! (\text{holdings}, \text{history}) \to (\mathbf{w}^\*, \text{trades}, \text{diversification})
//! $$
//!
//! Request-scoped orchestration of the optimization pipeline over an
//! injected price-history collaborator. Each holding's series is
//! fetched exactly once and reused across all pairwise correlations.

use tracing::warn;

use crate::correlation::correlation_matrix;
use crate::correlation::covariance_matrix;
use crate::diversification::analyze_diversification;
use crate::error::OptimizerError;
use crate::estimator::estimate_risk_profile;
use crate::estimator::RiskProfile;
use crate::optimizer::maximize_sharpe;
use crate::optimizer::SharpeOptimizerConfig;
use crate::rebalance::build_recommendations;
use crate::returns::return_series;
use crate::returns::ReturnSeries;
use crate::types::Holding;
use crate::types::OptimizationRequest;
use crate::types::OptimizationResult;
use crate::types::PortfolioReport;
use crate::types::PricePoint;

/// Price-history collaborator contract.
///
/// Implementations own transport, caching and retry policy; the engine
/// only reads. A failed fetch degrades that holding to default
/// estimates instead of failing the request.
pub trait PriceHistory {
  /// Chronological close-price observations for a symbol.
  fn history(&self, symbol: &str) -> anyhow::Result<Vec<PricePoint>>;
}

/// Runtime configuration for [`OptimizerEngine`].
#[derive(Clone, Copy, Debug, Default)]
pub struct OptimizerEngineConfig {
  /// Hyperparameters of the Sharpe gradient loop.
  pub optimizer: SharpeOptimizerConfig,
}

/// Single entry point for portfolio analysis requests.
///
/// Stateless between calls; all working data is scoped to one
/// [`OptimizerEngine::analyze`] invocation.
#[derive(Clone, Debug, Default)]
pub struct OptimizerEngine {
  config: OptimizerEngineConfig,
}

impl OptimizerEngine {
  /// Construct a new engine with explicit configuration.
  pub fn new(config: OptimizerEngineConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &OptimizerEngineConfig {
    &self.config
  }

  /// Run the full pipeline: validate, estimate, correlate, optimize,
  /// then derive recommendations and the diversification breakdown.
  pub fn analyze(
    &self,
    holdings: &[Holding],
    provider: &dyn PriceHistory,
    request: &OptimizationRequest,
  ) -> Result<PortfolioReport, OptimizerError> {
    if holdings.len() < 2 {
      return Err(OptimizerError::InsufficientHoldings(holdings.len()));
    }

    let series = self.fetch_return_series(holdings, provider);
    if series.iter().all(|s| s.is_empty()) {
      return Err(OptimizerError::NoUsableReturns);
    }

    let profiles: Vec<RiskProfile> = holdings
      .iter()
      .zip(series.iter())
      .map(|(h, s)| estimate_risk_profile(&h.id, s))
      .collect();
    let mu: Vec<f64> = profiles.iter().map(|p| p.expected_return).collect();
    let sigmas: Vec<f64> = profiles.iter().map(|p| p.volatility).collect();

    let all_returns: Vec<Vec<f64>> = series.into_iter().map(|s| s.returns).collect();
    let corr = correlation_matrix(&all_returns);
    let cov = covariance_matrix(&sigmas, &corr);

    let outcome = maximize_sharpe(&mu, &cov, self.config.optimizer)?;

    let result = OptimizationResult {
      weights: holdings
        .iter()
        .zip(outcome.weights.iter())
        .map(|(h, &w)| (h.id.clone(), w))
        .collect(),
      expected_return: outcome.expected_return,
      expected_volatility: outcome.volatility,
      sharpe_ratio: outcome.sharpe,
      risk_aversion: request.risk_tolerance.risk_aversion(),
    };
    let recommendations = build_recommendations(holdings, &outcome.weights);
    let diversification = analyze_diversification(holdings, &outcome.weights);

    Ok(PortfolioReport {
      result,
      recommendations,
      diversification,
    })
  }

  /// Fetch each holding's close series once and convert to returns.
  fn fetch_return_series(
    &self,
    holdings: &[Holding],
    provider: &dyn PriceHistory,
  ) -> Vec<ReturnSeries> {
    holdings
      .iter()
      .map(|h| match provider.history(&h.symbol) {
        Ok(points) => {
          let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
          return_series(&closes)
        }
        Err(err) => {
          warn!(
            holding_id = %h.id,
            symbol = %h.symbol,
            error = %err,
            "price history unavailable, degrading to default estimates"
          );
          ReturnSeries {
            returns: Vec::new(),
            low_confidence: true,
          }
        }
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use chrono::Days;
  use chrono::NaiveDate;
  use tracing_test::traced_test;

  use super::*;
  use crate::types::RiskTolerance;

  struct FixedHistory(HashMap<String, Vec<f64>>);

  impl PriceHistory for FixedHistory {
    fn history(&self, symbol: &str) -> anyhow::Result<Vec<PricePoint>> {
      let closes = self
        .0
        .get(symbol)
        .ok_or_else(|| anyhow::anyhow!("no history for {symbol}"))?;
      let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

      Ok(
        closes
          .iter()
          .enumerate()
          .map(|(i, &close)| PricePoint {
            date: start + Days::new(i as u64),
            close,
          })
          .collect(),
      )
    }
  }

  fn holding(id: &str, asset_class: &str, sector: &str, market_value: f64) -> Holding {
    Holding {
      id: id.to_string(),
      symbol: id.to_string(),
      asset_class: asset_class.to_string(),
      sector: sector.to_string(),
      quantity: 10.0,
      market_value,
      total_cost: market_value,
    }
  }

  fn trending_closes(drift: f64, wobble: f64, phase: f64) -> Vec<f64> {
    (0..120)
      .map(|i| {
        let t = i as f64;
        100.0 * (1.0 + drift * t + wobble * (t * 0.7 + phase).sin())
      })
      .collect()
  }

  fn two_asset_fixture() -> (Vec<Holding>, FixedHistory) {
    let holdings = vec![
      holding("h-a", "equity", "tech", 700.0),
      holding("h-b", "bond", "govt", 300.0),
    ];
    let mut histories = HashMap::new();
    histories.insert("h-a".to_string(), trending_closes(0.002, 0.01, 0.0));
    histories.insert("h-b".to_string(), trending_closes(0.0005, 0.004, 1.3));

    (holdings, FixedHistory(histories))
  }

  #[test]
  fn single_holding_is_rejected_without_partial_result() {
    let engine = OptimizerEngine::default();
    let holdings = vec![holding("h-a", "equity", "tech", 700.0)];
    let provider = FixedHistory(HashMap::new());

    let result = engine.analyze(&holdings, &provider, &OptimizationRequest::default());
    assert!(matches!(
      result,
      Err(OptimizerError::InsufficientHoldings(1))
    ));
  }

  #[test]
  fn full_pipeline_produces_a_consistent_report() {
    let engine = OptimizerEngine::default();
    let (holdings, provider) = two_asset_fixture();
    let request = OptimizationRequest {
      risk_tolerance: RiskTolerance::Moderate,
      ..Default::default()
    };

    let report = engine.analyze(&holdings, &provider, &request).unwrap();

    let sum_w: f64 = report.result.weights.iter().map(|(_, w)| w).sum();
    assert!((sum_w - 1.0).abs() < 1e-6);
    assert!(report.result.weights.iter().all(|&(_, w)| w >= 0.0));
    assert!(report.result.expected_volatility.is_finite());
    assert!(report.result.sharpe_ratio.is_finite());
    assert_eq!(report.result.risk_aversion, 2.0);

    let weights: Vec<f64> = report.result.weights.iter().map(|&(_, w)| w).collect();
    let h = weights.iter().map(|w| w * w).sum::<f64>();
    assert!((report.diversification.herfindahl_index - h).abs() < 1e-12);
    assert!((report.diversification.diversification_score - (1.0 - h)).abs() < 1e-12);

    for rec in &report.recommendations {
      assert!((rec.optimal_weight - rec.current_weight).abs() > 0.05);
      assert!(rec.amount > 0.0);
    }
  }

  #[test]
  fn flat_price_holding_still_yields_finite_outputs() {
    let engine = OptimizerEngine::default();
    let holdings = vec![
      holding("h-a", "equity", "tech", 500.0),
      holding("h-flat", "cash", "cash", 500.0),
    ];
    let mut histories = HashMap::new();
    histories.insert("h-a".to_string(), trending_closes(0.002, 0.01, 0.0));
    histories.insert("h-flat".to_string(), vec![100.0; 120]);
    let provider = FixedHistory(histories);

    let report = engine
      .analyze(&holdings, &provider, &OptimizationRequest::default())
      .unwrap();

    let sum_w: f64 = report.result.weights.iter().map(|(_, w)| w).sum();
    assert!((sum_w - 1.0).abs() < 1e-6);
    assert!(report.result.expected_volatility.is_finite());
    assert!(report.result.sharpe_ratio.is_finite());
  }

  #[traced_test]
  #[test]
  fn provider_failure_degrades_to_defaults_with_warning() {
    let engine = OptimizerEngine::default();
    let holdings = vec![
      holding("h-a", "equity", "tech", 500.0),
      holding("h-missing", "equity", "tech", 500.0),
    ];
    let mut histories = HashMap::new();
    histories.insert("h-a".to_string(), trending_closes(0.002, 0.01, 0.0));
    let provider = FixedHistory(histories);

    let report = engine
      .analyze(&holdings, &provider, &OptimizationRequest::default())
      .unwrap();

    assert!(logs_contain("price history unavailable"));
    assert!(logs_contain("h-missing"));
    let sum_w: f64 = report.result.weights.iter().map(|(_, w)| w).sum();
    assert!((sum_w - 1.0).abs() < 1e-6);
  }

  #[test]
  fn all_holdings_without_data_are_rejected() {
    let engine = OptimizerEngine::default();
    let holdings = vec![
      holding("h-a", "equity", "tech", 500.0),
      holding("h-b", "equity", "tech", 500.0),
    ];
    let provider = FixedHistory(HashMap::new());

    let result = engine.analyze(&holdings, &provider, &OptimizationRequest::default());
    assert!(matches!(result, Err(OptimizerError::NoUsableReturns)));
  }

  #[test]
  fn report_serializes_for_the_backend() {
    let engine = OptimizerEngine::default();
    let (holdings, provider) = two_asset_fixture();

    let report = engine
      .analyze(&holdings, &provider, &OptimizationRequest::default())
      .unwrap();
    let json = serde_json::to_string(&report).unwrap();

    assert!(json.contains("herfindahl_index"));
    assert!(json.contains("sharpe_ratio"));
  }
}

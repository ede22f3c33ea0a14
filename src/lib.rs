//! # Folio Optimizer
//!
//! $$
//! \mathbf{w}^\* = \arg\max_{\mathbf{w}\ge 0,\ \sum_i w_i = 1} \frac{\mathbf{w}^\top\mu}{\sqrt{\mathbf{w}^\top\Sigma\mathbf{w}}}
//! $$
//!
//! Investment portfolio optimization core for a personal-finance
//! backend: return and volatility estimation from price history,
//! Pearson correlation matrices, Sharpe-ratio maximization over
//! non-negative weights, rebalancing recommendations and
//! diversification analysis. Pure in-process computation; price
//! history is supplied by the caller through [`PriceHistory`].

pub mod correlation;
pub mod diversification;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod optimizer;
pub mod rebalance;
pub mod returns;
pub mod types;

pub use correlation::correlation_matrix;
pub use correlation::covariance_matrix;
pub use correlation::pearson;
pub use correlation::FALLBACK_CORRELATION;
pub use diversification::analyze_diversification;
pub use diversification::herfindahl_index;
pub use engine::OptimizerEngine;
pub use engine::OptimizerEngineConfig;
pub use engine::PriceHistory;
pub use error::OptimizerError;
pub use estimator::estimate_risk_profile;
pub use estimator::RiskProfile;
pub use optimizer::maximize_sharpe;
pub use optimizer::maximize_sharpe_interruptible;
pub use optimizer::SharpeOptimizerConfig;
pub use optimizer::SharpeOutcome;
pub use rebalance::build_recommendations;
pub use rebalance::current_weights;
pub use rebalance::HIGH_PRIORITY_THRESHOLD;
pub use rebalance::MATERIALITY_THRESHOLD;
pub use returns::return_series;
pub use returns::simple_returns;
pub use returns::ReturnSeries;
pub use returns::MIN_HISTORY_POINTS;
pub use types::DiversificationAnalysis;
pub use types::Holding;
pub use types::OptimizationRequest;
pub use types::OptimizationResult;
pub use types::PortfolioReport;
pub use types::PricePoint;
pub use types::Priority;
pub use types::RebalancingRecommendation;
pub use types::RiskTolerance;
pub use types::TradeAction;

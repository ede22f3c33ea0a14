//! # Correlation Matrix Builder
//!
//! $$
//! \rho_{xy} = \frac{n\sum xy - \sum x \sum y}{\sqrt{(n\sum x^2-(\sum x)^2)(n\sum y^2-(\sum y)^2)}}
//! $$
//!
//! Pairwise Pearson correlation across return series and the covariance
//! matrix derived from it. Degenerate pairs fall back to a neutral
//! correlation rather than emitting NaN.

/// Substitute when a pair has too little overlap or zero variance.
pub const FALLBACK_CORRELATION: f64 = 0.5;

/// Pearson correlation of two return series over their common tail.
///
/// Series of different length are aligned on their most recent
/// overlapping periods. Overlap shorter than two points or a zero
/// variance on either side yields [`FALLBACK_CORRELATION`].
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
  let n = x.len().min(y.len());
  if n < 2 {
    return FALLBACK_CORRELATION;
  }

  let xs = &x[x.len() - n..];
  let ys = &y[y.len() - n..];
  let nf = n as f64;

  let mut sum_x = 0.0;
  let mut sum_y = 0.0;
  let mut sum_xy = 0.0;
  let mut sum_xx = 0.0;
  let mut sum_yy = 0.0;

  for i in 0..n {
    sum_x += xs[i];
    sum_y += ys[i];
    sum_xy += xs[i] * ys[i];
    sum_xx += xs[i] * xs[i];
    sum_yy += ys[i] * ys[i];
  }

  let denom = ((nf * sum_xx - sum_x * sum_x) * (nf * sum_yy - sum_y * sum_y)).sqrt();
  if denom > 1e-12 {
    ((nf * sum_xy - sum_x * sum_y) / denom).clamp(-1.0, 1.0)
  } else {
    FALLBACK_CORRELATION
  }
}

/// Build a Pearson correlation matrix from per-holding return series.
///
/// Only the upper triangle is computed and mirrored, so the result is
/// exactly symmetric. Diagonal entries are fixed at 1.0 by definition.
pub fn correlation_matrix(all_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = all_returns.len();
  let mut corr = vec![vec![1.0; n]; n];

  for i in 0..n {
    for j in (i + 1)..n {
      let r = pearson(&all_returns[i], &all_returns[j]);
      corr[i][j] = r;
      corr[j][i] = r;
    }
  }

  corr
}

/// Build covariance matrix from per-asset volatilities and a correlation matrix.
pub fn covariance_matrix(sigmas: &[f64], corr: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = sigmas.len();
  let mut cov = vec![vec![0.0; n]; n];

  for i in 0..n {
    for j in 0..n {
      let c_ij = corr
        .get(i)
        .and_then(|row| row.get(j))
        .copied()
        .unwrap_or(if i == j { 1.0 } else { 0.0 });
      cov[i][j] = sigmas[i] * sigmas[j] * c_ij;
    }
  }

  cov
}

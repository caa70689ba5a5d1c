use ndarray::{Array2, ArrayView2};

/// A stateless calculator for sample statistics over a return series.
///
/// A series is laid out with one row per period and one column per asset. The
/// validator in the `risk` crate guarantees a rectangular, non-empty series
/// before the engine is reached.
#[derive(Debug, Default)]
pub struct StatisticsEngine {}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arithmetic mean of the returns of asset `asset` across all periods.
    pub fn mean(&self, series: ArrayView2<f64>, asset: usize) -> f64 {
        series.column(asset).mean().unwrap_or(f64::NAN)
    }

    /// Unbiased sample covariance between assets `i` and `j`.
    ///
    /// Uses the (T - 1) denominator, so `i == j` gives the sample variance.
    /// A single-period series divides by zero and returns NaN or infinity.
    pub fn sample_covariance(&self, series: ArrayView2<f64>, i: usize, j: usize) -> f64 {
        let (n_periods, _) = series.dim();
        let mean_i = self.mean(series, i);
        let mean_j = self.mean(series, j);

        let mut co_deviation = 0.0;
        for k in 0..n_periods {
            co_deviation += (series[[k, i]] - mean_i) * (series[[k, j]] - mean_j);
        }

        co_deviation / (n_periods as f64 - 1.0)
    }

    /// The N×N matrix of pairwise sample covariances.
    ///
    /// Every entry is computed directly, O(N²·T), which is fine for dozens of
    /// assets over hundreds of periods.
    pub fn covariance_matrix(&self, series: ArrayView2<f64>) -> Array2<f64> {
        let (n_periods, n_assets) = series.dim();

        tracing::debug!(
            periods = n_periods,
            assets = n_assets,
            "Computing sample covariance matrix"
        );

        Array2::from_shape_fn((n_assets, n_assets), |(i, j)| {
            self.sample_covariance(series, i, j)
        })
    }
}

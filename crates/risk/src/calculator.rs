use crate::validator::{RiskModel, ValidatedInput};
use analytics::StatisticsEngine;
use core_types::{Annualization, PortfolioRisk};
use ndarray::ArrayView2;

/// Supplies the (i, j) entry of the N×N kernel of a portfolio quadratic form.
pub(crate) trait VarianceKernel {
    fn asset_count(&self) -> usize;
    fn entry(&self, i: usize, j: usize) -> f64;
}

/// A covariance matrix used as-is.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CovarianceKernel<'a> {
    covariance: ArrayView2<'a, f64>,
}

impl VarianceKernel for CovarianceKernel<'_> {
    fn asset_count(&self) -> usize {
        self.covariance.nrows()
    }

    fn entry(&self, i: usize, j: usize) -> f64 {
        self.covariance[[i, j]]
    }
}

/// A correlation matrix scaled by volatilities on the fly: ρ_ij·σ_i·σ_j.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CorrelationKernel<'a> {
    correlation: ArrayView2<'a, f64>,
    volatilities: &'a [f64],
}

impl VarianceKernel for CorrelationKernel<'_> {
    fn asset_count(&self) -> usize {
        self.correlation.nrows()
    }

    fn entry(&self, i: usize, j: usize) -> f64 {
        self.correlation[[i, j]] * self.volatilities[i] * self.volatilities[j]
    }
}

/// Σ_i Σ_j w_i·w_j·K_ij. The kernel and the weights must have the same size.
pub(crate) fn quadratic_form(weights: &[f64], kernel: &impl VarianceKernel) -> f64 {
    let n = kernel.asset_count();
    let mut variance = 0.0;
    for i in 0..n {
        for j in 0..n {
            variance += weights[i] * weights[j] * kernel.entry(i, j);
        }
    }
    variance
}

/// A stateless calculator turning validated input into portfolio variance.
#[derive(Debug, Default)]
pub struct VarianceCalculator {
    statistics: StatisticsEngine,
}

impl VarianceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The per-period portfolio variance for the input's risk model.
    pub fn portfolio_variance(&self, input: &ValidatedInput) -> f64 {
        let weights = input.weights();
        match input.model() {
            RiskModel::Series(series) => {
                let covariance = self.statistics.covariance_matrix(series.view());
                quadratic_form(weights, &CovarianceKernel { covariance: covariance.view() })
            }
            RiskModel::Covariance(matrix) => {
                quadratic_form(weights, &CovarianceKernel { covariance: matrix.view() })
            }
            RiskModel::Correlation {
                matrix,
                volatilities,
            } => quadratic_form(
                weights,
                &CorrelationKernel {
                    correlation: matrix.view(),
                    volatilities,
                },
            ),
        }
    }

    /// Scales a per-period variance to an annual one. Applied once, to the total.
    pub fn annualize(&self, variance: f64, annualization: Annualization) -> f64 {
        match annualization {
            Annualization::NotAnnualized => variance,
            Annualization::Annualized(_) => variance * annualization.factor(),
        }
    }

    /// Square root of the variance. Negative variance (non-PSD input) gives NaN.
    pub fn standard_deviation(&self, variance: f64) -> f64 {
        variance.sqrt()
    }

    /// Variance, annualization and standard deviation in one step.
    pub fn measure(&self, input: &ValidatedInput, annualization: Annualization) -> PortfolioRisk {
        let raw_variance = self.portfolio_variance(input);
        tracing::debug!(raw_variance, %annualization, "Computed per-period portfolio variance");

        let variance = self.annualize(raw_variance, annualization);
        let standard_deviation = self.standard_deviation(variance);

        if !standard_deviation.is_finite() {
            tracing::warn!(
                variance,
                "Portfolio risk is not finite; the input may be degenerate or not positive semi-definite"
            );
        }

        PortfolioRisk {
            variance,
            standard_deviation,
        }
    }
}

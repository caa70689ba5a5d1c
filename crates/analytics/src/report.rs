use core_types::{Annualization, DataType, PortfolioRisk};
use serde::{Deserialize, Serialize};

/// A standardized report of a portfolio's measured risk.
///
/// This struct is the final output of a computation and serves as the data
/// transfer object between the numeric core and whatever presents it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    // I. What was measured
    pub data_type: DataType,
    pub asset_count: usize,
    pub observation_count: Option<usize>, // Option<> because only return series have periods
    pub annualization: Annualization,

    // II. Results
    pub variance: f64,
    pub standard_deviation: f64,
}

impl RiskReport {
    pub fn new(
        data_type: DataType,
        asset_count: usize,
        observation_count: Option<usize>,
        annualization: Annualization,
        risk: PortfolioRisk,
    ) -> Self {
        Self {
            data_type,
            asset_count,
            observation_count,
            annualization,
            variance: risk.variance,
            standard_deviation: risk.standard_deviation,
        }
    }

    /// The measured risk without the descriptive fields.
    pub fn risk(&self) -> PortfolioRisk {
        PortfolioRisk {
            variance: self.variance,
            standard_deviation: self.standard_deviation,
        }
    }

    /// False when a degenerate input produced NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.variance.is_finite() && self.standard_deviation.is_finite()
    }
}

use crate::enums::{Annualization, DataType};
use serde::{Deserialize, Serialize};

/// An ordered sequence of real numbers, e.g. one row of returns or a weight vector.
pub type NumericSequence = Vec<f64>;

/// Rows of numbers. May be ragged straight out of the parser.
pub type NumericMatrix = Vec<NumericSequence>;

/// The raw, unparsed inputs of one computation.
///
/// Nothing here has been checked yet; see `risk::validator` for the rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRequest {
    pub data_type: DataType,
    /// Newline-separated rows of comma and/or whitespace separated values.
    pub data: String,
    pub weights: String,
    /// Only read for `DataType::Correlation`.
    pub volatilities: Option<String>,
    pub annualization: Annualization,
}

impl RiskRequest {
    pub fn new(data_type: DataType, data: impl Into<String>, weights: impl Into<String>) -> Self {
        Self {
            data_type,
            data: data.into(),
            weights: weights.into(),
            volatilities: None,
            annualization: Annualization::NotAnnualized,
        }
    }

    pub fn with_volatilities(mut self, volatilities: impl Into<String>) -> Self {
        self.volatilities = Some(volatilities.into());
        self
    }

    pub fn with_annualization(mut self, annualization: Annualization) -> Self {
        self.annualization = annualization;
        self
    }
}

/// The numeric outcome of a successful computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRisk {
    pub variance: f64,
    /// NaN when the variance is negative (non-PSD input).
    pub standard_deviation: f64,
}

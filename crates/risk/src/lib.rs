//! # Varcalc Risk Pipeline
//!
//! Turns raw text inputs into a portfolio variance and standard deviation:
//! parse, validate (first failing rule wins), then evaluate the weighted
//! quadratic form for the chosen risk representation and annualize it.
//!
//! Every call is an independent, pure computation; nothing is cached or shared
//! between requests.

pub mod calculator;
pub mod error;
pub mod parser;
pub mod validator;

pub use calculator::VarianceCalculator;
pub use error::{RiskError, SemanticError};
pub use validator::{RiskModel, ValidatedInput, validate, validate_series};

use analytics::{RiskReport, StatisticsEngine};
use core_types::{PortfolioRisk, RiskRequest};
use ndarray::Array2;

/// Validates a request and computes its variance and standard deviation.
pub fn compute(request: &RiskRequest) -> Result<PortfolioRisk, RiskError> {
    assess(request).map(|report| report.risk())
}

/// Like [`compute`], but returns a full report describing what was measured.
#[tracing::instrument(name = "risk_assess", skip(request), fields(data_type = %request.data_type))]
pub fn assess(request: &RiskRequest) -> Result<RiskReport, RiskError> {
    let input = validate(request).inspect_err(|e| {
        tracing::debug!(error = %e, "Risk request rejected");
    })?;

    let risk = VarianceCalculator::new().measure(&input, request.annualization);

    tracing::info!(
        assets = input.asset_count(),
        variance = risk.variance,
        standard_deviation = risk.standard_deviation,
        "Portfolio risk computed"
    );

    Ok(RiskReport::new(
        input.data_type(),
        input.asset_count(),
        input.observation_count(),
        request.annualization,
        risk,
    ))
}

/// The sample covariance matrix of a raw return series.
pub fn covariance_of_series(text: &str) -> Result<Array2<f64>, RiskError> {
    let series = validate_series(text)?;
    Ok(StatisticsEngine::new().covariance_matrix(series.view()))
}

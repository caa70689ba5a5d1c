//! The gate in front of the calculator.
//!
//! Rules run in a fixed order and stop at the first failure, so the same bad
//! request always reports the same error:
//!
//! 1. presence of data, weights, and volatilities (correlation only)
//! 2. format of data, then weights
//! 3. weights within [0, 1]
//! 4. weights sum to 1
//! 5. per data type shape checks, the weight count, and for correlation the
//!    correlation bounds and the volatility format, sign and count

use crate::error::{RiskError, SemanticError};
use crate::parser::{parse_matrix, parse_sequence};
use core_types::{DataType, Field, NumericMatrix, NumericSequence, ParseError, RiskRequest};
use ndarray::Array2;

/// Weight sums must land in this closed interval.
pub const WEIGHT_SUM_MIN: f64 = 0.99999999;
pub const WEIGHT_SUM_MAX: f64 = 1.00000001;

/// The risk representation after every check has passed.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskModel {
    /// T×N returns.
    Series(Array2<f64>),
    /// N×N covariance matrix.
    Covariance(Array2<f64>),
    /// N×N correlation matrix with entries in [-1, 1] and N non-negative volatilities.
    Correlation {
        matrix: Array2<f64>,
        volatilities: NumericSequence,
    },
}

/// A request that passed validation. Weight count equals asset count.
///
/// Only [`validate`] builds one, so the shapes inside always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    model: RiskModel,
    weights: NumericSequence,
}

impl ValidatedInput {
    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn data_type(&self) -> DataType {
        match self.model {
            RiskModel::Series(_) => DataType::Series,
            RiskModel::Covariance(_) => DataType::Covariance,
            RiskModel::Correlation { .. } => DataType::Correlation,
        }
    }

    pub fn asset_count(&self) -> usize {
        self.weights.len()
    }

    /// Number of periods, for return series only.
    pub fn observation_count(&self) -> Option<usize> {
        match &self.model {
            RiskModel::Series(series) => Some(series.nrows()),
            RiskModel::Covariance(_) | RiskModel::Correlation { .. } => None,
        }
    }
}

/// Checks a raw request and returns its parsed, validated form.
pub fn validate(request: &RiskRequest) -> Result<ValidatedInput, RiskError> {
    let data_type = request.data_type;
    let data_field = Field::Data(data_type);

    // --- 1. Presence ---
    require_present(data_field, Some(&request.data))?;
    require_present(Field::Weights, Some(&request.weights))?;
    if data_type.requires_volatilities() {
        require_present(Field::Volatilities, request.volatilities.as_deref())?;
    }

    // --- 2. Format ---
    let data = parsed(data_field, parse_matrix(&request.data))?;
    let weights = parsed(Field::Weights, parse_sequence(&request.weights))?;

    // --- 3. & 4. Weights ---
    if !all_within(&weights, 0.0, 1.0) {
        return Err(SemanticError::WeightsOutOfBounds.into());
    }
    let weight_sum: f64 = weights.iter().sum();
    if !(WEIGHT_SUM_MIN..=WEIGHT_SUM_MAX).contains(&weight_sum) {
        return Err(SemanticError::WeightsNotNormalized.into());
    }

    // --- 5. Shape and cardinality, per data type ---
    let model = match data_type {
        DataType::Series => {
            ensure_rows_equal_length(&data)?;
            ensure_count(&data, &weights, SemanticError::WeightCountMismatch)?;
            RiskModel::Series(to_array(data))
        }
        DataType::Covariance => {
            ensure_square_and_complete(&data, data_field)?;
            ensure_count(&data, &weights, SemanticError::WeightCountMismatch)?;
            RiskModel::Covariance(to_array(data))
        }
        DataType::Correlation => {
            ensure_square_and_complete(&data, data_field)?;
            if !all_within(data.iter().flatten(), -1.0, 1.0) {
                return Err(SemanticError::CorrelationOutOfBounds.into());
            }
            ensure_count(&data, &weights, SemanticError::WeightCountMismatch)?;

            let raw_volatilities = request.volatilities.as_deref().unwrap_or_default();
            let volatilities = parsed(Field::Volatilities, parse_sequence(raw_volatilities))?;
            if !all_within(&volatilities, 0.0, f64::INFINITY) {
                return Err(SemanticError::NegativeVolatility.into());
            }
            ensure_count(&data, &volatilities, SemanticError::VolatilityCountMismatch)?;

            RiskModel::Correlation {
                matrix: to_array(data),
                volatilities,
            }
        }
    };

    tracing::debug!(
        data_type = %data_type,
        assets = weights.len(),
        "Risk request passed validation"
    );

    Ok(ValidatedInput { model, weights })
}

/// Runs only the series checks that apply without weights: presence, format and
/// equal row lengths.
pub fn validate_series(text: &str) -> Result<Array2<f64>, RiskError> {
    let field = Field::Data(DataType::Series);
    require_present(field, Some(text))?;
    let series = parsed(field, parse_matrix(text))?;
    ensure_rows_equal_length(&series)?;
    Ok(to_array(series))
}

/// Packs rows that already passed a shape check into a dense array.
fn to_array(rows: NumericMatrix) -> Array2<f64> {
    let n_cols = rows.first().map_or(0, Vec::len);
    Array2::from_shape_fn((rows.len(), n_cols), |(i, j)| rows[i][j])
}

fn require_present(field: Field, text: Option<&str>) -> Result<(), RiskError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(RiskError::Blank(field)),
    }
}

fn parsed<T>(field: Field, result: Result<Option<T>, ParseError>) -> Result<T, RiskError> {
    match result {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(RiskError::Blank(field)),
        Err(source) => Err(RiskError::Format { field, source }),
    }
}

fn all_within<'a>(values: impl IntoIterator<Item = &'a f64>, lower: f64, upper: f64) -> bool {
    values
        .into_iter()
        .all(|value| (lower..=upper).contains(value))
}

fn ensure_rows_equal_length(matrix: &[NumericSequence]) -> Result<(), RiskError> {
    let first_len = matrix.first().map_or(0, Vec::len);
    if matrix.iter().all(|row| row.len() == first_len) {
        Ok(())
    } else {
        Err(SemanticError::IncompleteSeries.into())
    }
}

/// Every row must be as long as the matrix is tall, which rules out both ragged
/// and rectangular input.
fn ensure_square_and_complete(matrix: &[NumericSequence], field: Field) -> Result<(), RiskError> {
    let row_count = matrix.len();
    let first_len = matrix.first().map_or(0, Vec::len);
    if matrix
        .iter()
        .all(|row| row.len() == row_count && row.len() == first_len)
    {
        Ok(())
    } else {
        Err(SemanticError::IncompleteOrNonSquareMatrix { field }.into())
    }
}

/// The number of values must match the asset count (columns of the first row).
fn ensure_count(
    matrix: &[NumericSequence],
    values: &[f64],
    mismatch: SemanticError,
) -> Result<(), RiskError> {
    let asset_count = matrix.first().map_or(0, Vec::len);
    if asset_count == values.len() {
        Ok(())
    } else {
        Err(mismatch.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semantic(result: Result<ValidatedInput, RiskError>) -> SemanticError {
        match result {
            Err(RiskError::Semantic(kind)) => kind,
            other => panic!("expected a semantic error, got {other:?}"),
        }
    }

    #[test]
    fn blank_data_is_reported_before_blank_weights() {
        let request = RiskRequest::new(DataType::Covariance, "", "");
        assert_eq!(
            validate(&request),
            Err(RiskError::Blank(Field::Data(DataType::Covariance)))
        );
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let request = RiskRequest::new(DataType::Series, "1 2\n3 4", "  \n ");
        assert_eq!(validate(&request), Err(RiskError::Blank(Field::Weights)));
    }

    #[test]
    fn missing_volatilities_are_blank_before_any_format_check() {
        let request = RiskRequest::new(DataType::Correlation, "1,x\n0,1", "0.5,0.5");
        assert_eq!(validate(&request), Err(RiskError::Blank(Field::Volatilities)));
    }

    #[test]
    fn data_format_is_checked_before_weight_format() {
        let request = RiskRequest::new(DataType::Series, "1,2\n3,?", "a,b");
        let err = validate(&request).unwrap_err();
        assert_eq!(err.field(), Some(Field::Data(DataType::Series)));
        assert!(matches!(err, RiskError::Format { .. }));
    }

    #[test]
    fn weights_outside_unit_interval_are_rejected() {
        let request = RiskRequest::new(DataType::Covariance, "1 0\n0 1", "1.5 -0.5");
        assert_eq!(semantic(validate(&request)), SemanticError::WeightsOutOfBounds);
    }

    #[test]
    fn weights_must_sum_to_one() {
        for weights in ["0.25 0.25", "0.75 0.75"] {
            let request = RiskRequest::new(DataType::Covariance, "1 0\n0 1", weights);
            assert_eq!(semantic(validate(&request)), SemanticError::WeightsNotNormalized);
        }
    }

    #[test]
    fn weight_sum_tolerance_is_inclusive_of_tiny_drift() {
        let request = RiskRequest::new(DataType::Covariance, "1 0 0\n0 1 0\n0 0 1", "0.333333333 0.333333333 0.333333334");
        assert!(validate(&request).is_ok());

        let request = RiskRequest::new(DataType::Covariance, "1 0\n0 1", "0.5 0.4999");
        assert_eq!(semantic(validate(&request)), SemanticError::WeightsNotNormalized);
    }

    #[test]
    fn ragged_series_fails_before_weight_count() {
        let request = RiskRequest::new(DataType::Series, "1 2\n3", "0.2 0.3 0.5");
        assert_eq!(semantic(validate(&request)), SemanticError::IncompleteSeries);
    }

    #[test]
    fn series_weight_count_must_match_columns() {
        let request = RiskRequest::new(DataType::Series, "1 2\n3 4\n5 6", "0.2 0.3 0.5");
        assert_eq!(semantic(validate(&request)), SemanticError::WeightCountMismatch);
    }

    #[test]
    fn covariance_weight_count_must_match_columns() {
        let request = RiskRequest::new(DataType::Covariance, "0.04 0 0\n0 0.09 0\n0 0 0.01", "0.5 0.5");
        assert_eq!(semantic(validate(&request)), SemanticError::WeightCountMismatch);
    }

    #[test]
    fn validated_covariance_is_stored_dense() {
        let request = RiskRequest::new(DataType::Covariance, "0.04, 0.01\n0.01, 0.09", "0.25 0.75");
        let input = validate(&request).unwrap();

        assert_eq!(input.weights(), &[0.25, 0.75]);
        match input.model() {
            RiskModel::Covariance(matrix) => {
                assert_eq!(matrix.dim(), (2, 2));
                assert_eq!(matrix[[0, 1]], 0.01);
                assert_eq!(matrix[[1, 1]], 0.09);
            }
            other => panic!("expected a covariance model, got {other:?}"),
        }
    }

    #[test]
    fn rectangular_covariance_is_not_square() {
        let request = RiskRequest::new(DataType::Covariance, "1 0 0\n0 1 0", "0.5 0.5");
        assert_eq!(
            semantic(validate(&request)),
            SemanticError::IncompleteOrNonSquareMatrix {
                field: Field::Data(DataType::Covariance)
            }
        );
    }

    #[test]
    fn ragged_covariance_is_incomplete() {
        let request = RiskRequest::new(DataType::Covariance, "0.04 0\n0", "0.5 0.5");
        assert!(matches!(
            semantic(validate(&request)),
            SemanticError::IncompleteOrNonSquareMatrix { .. }
        ));
    }

    #[test]
    fn correlation_entries_are_bounded() {
        let request = RiskRequest::new(DataType::Correlation, "1 1.2\n1.2 1", "0.5 0.5")
            .with_volatilities("0.2 0.3");
        assert_eq!(semantic(validate(&request)), SemanticError::CorrelationOutOfBounds);
    }

    #[test]
    fn correlation_weight_count_comes_before_volatility_format() {
        let request = RiskRequest::new(DataType::Correlation, "1 0\n0 1", "1")
            .with_volatilities("oops");
        assert_eq!(semantic(validate(&request)), SemanticError::WeightCountMismatch);
    }

    #[test]
    fn volatilities_must_be_numeric() {
        let request = RiskRequest::new(DataType::Correlation, "1 0\n0 1", "0.5 0.5")
            .with_volatilities("0.2 high");
        let err = validate(&request).unwrap_err();
        assert!(matches!(
            err,
            RiskError::Format {
                field: Field::Volatilities,
                ..
            }
        ));
    }

    #[test]
    fn negative_volatility_is_checked_before_its_count() {
        let request = RiskRequest::new(DataType::Correlation, "1 0\n0 1", "0.5 0.5")
            .with_volatilities("-0.2");
        assert_eq!(semantic(validate(&request)), SemanticError::NegativeVolatility);
    }

    #[test]
    fn volatility_count_must_match_assets() {
        let request = RiskRequest::new(DataType::Correlation, "1 0\n0 1", "0.5 0.5")
            .with_volatilities("0.2 0.3 0.4");
        assert_eq!(semantic(validate(&request)), SemanticError::VolatilityCountMismatch);
    }

    #[test]
    fn volatilities_are_ignored_outside_correlation_mode() {
        let request = RiskRequest::new(DataType::Covariance, "0.04 0\n0 0.09", "0.5 0.5")
            .with_volatilities("not even numbers");
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn valid_series_reports_its_shape() {
        let request = RiskRequest::new(DataType::Series, "1,2\n3,4\n5,6", "0.5,0.5");
        let input = validate(&request).unwrap();
        assert_eq!(input.data_type(), DataType::Series);
        assert_eq!(input.asset_count(), 2);
        assert_eq!(input.observation_count(), Some(3));
    }

    #[test]
    fn series_only_check_skips_weights() {
        assert_eq!(validate_series("1 2\n3 4").unwrap().dim(), (2, 2));
        assert_eq!(
            validate_series("1 2\n3"),
            Err(RiskError::Semantic(SemanticError::IncompleteSeries))
        );
        assert_eq!(
            validate_series(""),
            Err(RiskError::Blank(Field::Data(DataType::Series)))
        );
    }
}

use core_types::{Field, ParseError};
use thiserror::Error;

/// The first rule a risk request broke. Every variant is terminal for the request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("{0} cannot be blank.  Please enter data.")]
    Blank(Field),

    #[error("Incorrect format for {}.  Please check data format.", .field.format_name())]
    Format {
        field: Field,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl RiskError {
    /// The field the error refers to, if it refers to a single one.
    pub fn field(&self) -> Option<Field> {
        match self {
            RiskError::Blank(field) | RiskError::Format { field, .. } => Some(*field),
            RiskError::Semantic(_) => None,
        }
    }
}

/// Input that parsed but breaks a domain rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("All weights are not between 0 and 1.  Please check data.")]
    WeightsOutOfBounds,

    #[error("Weights do not sum to 1.  Please check data.")]
    WeightsNotNormalized,

    #[error(
        "At least one data series is incomplete.  Ensure there is no missing data and that all data series are of the same length."
    )]
    IncompleteSeries,

    #[error("{field} is incomplete.  Ensure there is no missing data and that matrix is square.")]
    IncompleteOrNonSquareMatrix { field: Field },

    #[error("Count of weights must match count of data series.")]
    WeightCountMismatch,

    #[error("All values in correlation matrix must be between -1 and 1, inclusive.")]
    CorrelationOutOfBounds,

    #[error("All standard deviations (volatilities) must be greater than or equal to 0.")]
    NegativeVolatility,

    #[error("Count of standard deviations (volatilities) must match count of data series.")]
    VolatilityCountMismatch,
}

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The risk representation supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// T×N historical return observations.
    Series,
    /// N×N covariance matrix.
    Covariance,
    /// N×N correlation matrix, paired with N volatilities.
    Correlation,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Series, DataType::Covariance, DataType::Correlation];

    /// Whether a volatility vector must accompany the data.
    pub fn requires_volatilities(&self) -> bool {
        matches!(self, DataType::Correlation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Series => "series",
            DataType::Covariance => "covariance",
            DataType::Correlation => "correlation",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::InvalidInput(
                    "data type".to_string(),
                    format!("'{s}' (expected series, covariance or correlation)"),
                )
            })
    }
}

/// How many return periods make up one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Periodicity {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
    Daily,
}

impl Periodicity {
    pub const ALL: [Periodicity; 5] = [
        Periodicity::Annual,
        Periodicity::SemiAnnual,
        Periodicity::Quarterly,
        Periodicity::Monthly,
        Periodicity::Daily,
    ];

    /// Number of periods per year. Daily assumes 252 trading days.
    pub fn factor(&self) -> u32 {
        match self {
            Periodicity::Annual => 1,
            Periodicity::SemiAnnual => 2,
            Periodicity::Quarterly => 4,
            Periodicity::Monthly => 12,
            Periodicity::Daily => 252,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Annual => "annual",
            Periodicity::SemiAnnual => "semi-annual",
            Periodicity::Quarterly => "quarterly",
            Periodicity::Monthly => "monthly",
            Periodicity::Daily => "daily",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Periodicity::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::InvalidInput(
                    "periodicity".to_string(),
                    format!("'{s}' (expected annual, semi-annual, quarterly, monthly or daily)"),
                )
            })
    }
}

/// Whether the per-period variance is scaled to an annual figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annualization {
    #[default]
    NotAnnualized,
    Annualized(Periodicity),
}

impl Annualization {
    /// The multiplier applied to a per-period variance.
    pub fn factor(&self) -> f64 {
        match self {
            Annualization::NotAnnualized => 1.0,
            Annualization::Annualized(periodicity) => f64::from(periodicity.factor()),
        }
    }
}

impl From<Option<Periodicity>> for Annualization {
    fn from(periodicity: Option<Periodicity>) -> Self {
        match periodicity {
            Some(p) => Annualization::Annualized(p),
            None => Annualization::NotAnnualized,
        }
    }
}

impl fmt::Display for Annualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annualization::NotAnnualized => f.write_str("not annualized"),
            Annualization::Annualized(p) => write!(f, "annualized ({p}, x{})", p.factor()),
        }
    }
}

/// An input field of a risk request. Used to name the field an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The main data field, whose meaning depends on the data type.
    Data(DataType),
    Weights,
    Volatilities,
}

impl Field {
    /// The lowercase name used inside format error messages.
    pub fn format_name(&self) -> &'static str {
        match self {
            Field::Data(DataType::Series) => "data series",
            Field::Data(DataType::Covariance) => "covariance matrix",
            Field::Data(DataType::Correlation) => "correlation matrix",
            Field::Weights => "weights",
            Field::Volatilities => "standard deviations",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Data(DataType::Series) => "Data series",
            Field::Data(DataType::Covariance) => "Covariance matrix",
            Field::Data(DataType::Correlation) => "Correlation matrix",
            Field::Weights => "Weights",
            Field::Volatilities => "Standard deviations (volatilities)",
        };
        f.write_str(name)
    }
}

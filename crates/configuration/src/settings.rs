use crate::error::ConfigError;
use core_types::{Annualization, Periodicity};
use serde::Deserialize;
use std::path::PathBuf;

/// The most decimal places an f64 can meaningfully display.
pub const MAX_PRECISION: u32 = 15;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub computation: Computation,
    pub output: Output,
    pub logging: Logging,
}

impl Config {
    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::ValidationError(format!(
                "output.precision must be at most {MAX_PRECISION}, got {}",
                self.output.precision
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Defaults for the computation itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Computation {
    /// Applied when the caller does not pick a periodicity. `None` means the
    /// variance is reported per period.
    pub periodicity: Option<Periodicity>,
}

impl Computation {
    pub fn annualization(&self) -> Annualization {
        Annualization::from(self.periodicity)
    }
}

/// How results are presented.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Decimal places shown for variance and standard deviation.
    pub precision: u32,
    pub format: OutputFormat,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            precision: 8,
            format: OutputFormat::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// An `EnvFilter` directive, e.g. "info" or "risk=debug". `RUST_LOG` overrides it.
    pub level: String,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            directory: None,
        }
    }
}

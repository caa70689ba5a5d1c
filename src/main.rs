use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use configuration::OutputFormat;
use configuration::settings::Config;
use core_types::{Annualization, DataType, Periodicity, RiskRequest};
use risk::RiskError;
use std::path::PathBuf;
use std::process::ExitCode;

mod output;

/// Exit status when the inputs fail validation.
const EXIT_INVALID_INPUT: u8 = 2;

/// The main entry point for the varcalc portfolio risk calculator.
fn main() -> ExitCode {
    // Load VARCALC__* overrides and RUST_LOG from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard =
        configuration::init_tracing(&config.logging).context("Failed to initialise logging")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Compute(args) => handle_compute(args, &config),
        Commands::Covariance(args) => handle_covariance(args, &config),
        Commands::Periodicities => {
            output::render_periodicities();
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Portfolio variance and standard deviation from return series, a covariance
/// matrix, or a correlation matrix with volatilities.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to ./varcalc.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute portfolio variance and standard deviation.
    Compute(ComputeArgs),
    /// Print the sample covariance matrix of a return series.
    Covariance(CovarianceArgs),
    /// List the annualization periodicities and their factors.
    Periodicities,
}

/// Where the data matrix comes from: inline text or a file.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct DataSource {
    /// Rows separated by newlines, values by commas and/or spaces.
    #[arg(long, allow_hyphen_values = true)]
    data: Option<String>,

    /// A text file holding the data matrix.
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,
}

impl DataSource {
    fn read(&self) -> Result<String> {
        match (&self.data, &self.data_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read data file {}", path.display())),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Args)]
struct PresentationArgs {
    /// Output format. Overrides the configuration file.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places shown. Overrides the configuration file.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=15))]
    precision: Option<u32>,
}

impl PresentationArgs {
    fn resolve(&self, config: &Config) -> (OutputFormat, u32) {
        (
            self.format.unwrap_or(config.output.format),
            self.precision.unwrap_or(config.output.precision),
        )
    }
}

#[derive(Args)]
struct ComputeArgs {
    /// How the data should be read: series, covariance or correlation.
    #[arg(long = "type", value_name = "TYPE")]
    data_type: DataType,

    #[command(flatten)]
    source: DataSource,

    /// One weight per asset, summing to 1.
    #[arg(long, allow_hyphen_values = true)]
    weights: String,

    /// One volatility per asset. Required for correlation input.
    #[arg(long, allow_hyphen_values = true)]
    vols: Option<String>,

    /// Annualize the variance: annual, semi-annual, quarterly, monthly or daily.
    #[arg(long, value_name = "PERIODICITY")]
    annualize: Option<Periodicity>,

    /// Report the per-period variance even if the configuration sets a periodicity.
    #[arg(long, conflicts_with = "annualize")]
    per_period: bool,

    #[command(flatten)]
    presentation: PresentationArgs,
}

#[derive(Args)]
struct CovarianceArgs {
    #[command(flatten)]
    source: DataSource,

    #[command(flatten)]
    presentation: PresentationArgs,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_compute(args: ComputeArgs, config: &Config) -> Result<ExitCode> {
    let annualization = resolve_annualization(
        args.annualize,
        args.per_period,
        config.computation.annualization(),
    );

    let mut request = RiskRequest::new(args.data_type, args.source.read()?, args.weights)
        .with_annualization(annualization);
    request.volatilities = args.vols;

    let (format, precision) = args.presentation.resolve(config);
    match risk::assess(&request) {
        Ok(report) => {
            output::render_report(&report, format, precision)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_invalid_input(&e)),
    }
}

/// `--annualize` wins, then `--per-period`, then the configured default.
fn resolve_annualization(
    annualize: Option<Periodicity>,
    per_period: bool,
    configured: Annualization,
) -> Annualization {
    match (annualize, per_period) {
        (Some(periodicity), _) => Annualization::Annualized(periodicity),
        (None, true) => Annualization::NotAnnualized,
        (None, false) => configured,
    }
}

fn handle_covariance(args: CovarianceArgs, config: &Config) -> Result<ExitCode> {
    let text = args.source.read()?;
    let (format, precision) = args.presentation.resolve(config);

    match risk::covariance_of_series(&text) {
        Ok(matrix) => {
            output::render_matrix(&matrix, format, precision)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_invalid_input(&e)),
    }
}

fn report_invalid_input(error: &RiskError) -> ExitCode {
    tracing::debug!(error = ?error, "Input rejected");
    eprintln!("Error: {error}");
    ExitCode::from(EXIT_INVALID_INPUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIGURED_MONTHLY: Annualization = Annualization::Annualized(Periodicity::Monthly);

    #[test]
    fn annualize_flag_overrides_configuration() {
        let chosen = resolve_annualization(Some(Periodicity::Daily), false, CONFIGURED_MONTHLY);
        assert_eq!(chosen, Annualization::Annualized(Periodicity::Daily));
    }

    #[test]
    fn per_period_turns_off_configured_periodicity() {
        let chosen = resolve_annualization(None, true, CONFIGURED_MONTHLY);
        assert_eq!(chosen, Annualization::NotAnnualized);
    }

    #[test]
    fn configured_periodicity_applies_without_flags() {
        assert_eq!(resolve_annualization(None, false, CONFIGURED_MONTHLY), CONFIGURED_MONTHLY);
        assert_eq!(
            resolve_annualization(None, false, Annualization::NotAnnualized),
            Annualization::NotAnnualized
        );
    }

    #[test]
    fn data_file_with_trailing_newline_is_a_valid_series() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1 2\n3 4\n5 6\n").unwrap();

        let source = DataSource {
            data: None,
            data_file: Some(file.path().to_path_buf()),
        };
        let text = source.read().unwrap();
        let covariance = risk::covariance_of_series(&text).unwrap();

        assert_eq!(covariance.dim(), (2, 2));
        assert!((covariance[[0, 1]] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn missing_data_file_is_an_io_error() {
        let source = DataSource {
            data: None,
            data_file: Some(PathBuf::from("does/not/exist.txt")),
        };
        let error = source.read().unwrap_err();
        assert!(error.to_string().contains("Failed to read data file"));
    }
}

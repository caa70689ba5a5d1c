use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Computation, Logging, Output, OutputFormat};

/// Looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "varcalc.toml";

/// Prefix of environment overrides, e.g. `VARCALC__OUTPUT__PRECISION=4`.
pub const ENV_PREFIX: &str = "VARCALC";

/// Loads the application configuration.
///
/// With `path` set, that file must exist. Otherwise `varcalc.toml` is read if
/// present. Environment variables are layered on top, and the result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Annualization, Periodicity};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_deserialized() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("varcalc.toml");
        fs::write(
            &path,
            r#"
[computation]
periodicity = "semi-annual"

[output]
precision = 4
format = "json"

[logging]
level = "risk=debug"
directory = "logs"
"#,
        )
        .expect("write config");

        let config = load_config(Some(path.as_path())).expect("valid config");

        assert_eq!(
            config.computation.annualization(),
            Annualization::Annualized(Periodicity::SemiAnnual)
        );
        assert_eq!(config.output.precision, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.level, "risk=debug");
        assert_eq!(config.logging.directory.as_deref(), Some(Path::new("logs")));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("partial.toml");
        fs::write(&path, "[output]\nformat = \"table\"\n").expect("write config");

        let config = load_config(Some(path.as_path())).expect("valid config");

        assert_eq!(config.computation.annualization(), Annualization::NotAnnualized);
        assert_eq!(config.output.precision, 8);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempdir().expect("tempdir");
        let err = load_config(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn unknown_periodicity_fails_to_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[computation]\nperiodicity = \"weekly\"\n").expect("write config");

        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn excessive_precision_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("precise.toml");
        fs::write(&path, "[output]\nprecision = 40\n").expect("write config");

        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::ValidationError(_))
        ));
    }
}

use crate::error::ConfigError;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, LoggingSettings, MetricsSettings, ValidationRules};

/// Default configuration file name, looked up in the working directory (`roi.toml`).
pub const DEFAULT_CONFIG_NAME: &str = "roi";

/// Command-line arguments for locating the configuration file.
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file (defaults to ./roi.toml when present).
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub config: Option<PathBuf>,
}

/// Prefix of environment overrides, e.g. `ROI__VALIDATION__STALE_AFTER_DAYS=10`.
pub const ENV_PREFIX: &str = "ROI";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file (`path`, or an optional
/// `roi.toml`), then `ROI__SECTION__KEY` environment variables. The merged result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_layered(path, None)
}

/// [`load_config`] with `env` standing in for the process environment when given.
fn load_layered(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    builder = match path {
        Some(path) => builder.add_source(config::File::from(path).required(true)),
        None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
    };

    let config = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize::<Config>()?;

    validate(&config)?;
    tracing::debug!(?config, "Configuration loaded.");

    Ok(config)
}

/// Rejects settings the calculators cannot work with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.metrics.trailing_window_days <= 0 {
        return Err(ConfigError::ValidationError(format!(
            "metrics.trailing_window_days must be positive, got {}",
            config.metrics.trailing_window_days
        )));
    }
    if config.validation.stale_after_days < 0 {
        return Err(ConfigError::ValidationError(format!(
            "validation.stale_after_days must not be negative, got {}",
            config.validation.stale_after_days
        )));
    }
    let tolerance = config.validation.weight_tolerance;
    if tolerance < Decimal::ZERO || tolerance >= Decimal::ONE {
        return Err(ConfigError::ValidationError(format!(
            "validation.weight_tolerance must be in [0, 1), got {tolerance}"
        )));
    }
    Ok(())
}

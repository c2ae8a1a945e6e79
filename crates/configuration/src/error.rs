use thiserror::Error;

/// Failures while reading `roi.toml` and the `ROI__*` overrides, or while checking them.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read roi.toml or ROI__ environment overrides: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid dashboard configuration: {0}")]
    ValidationError(String),
}

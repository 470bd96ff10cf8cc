use thiserror::Error;

/// Failures while reading or writing settings text.
///
/// Out-of-range numbers are not errors; [`super::Settings::sanitized`] clamps them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings YAML parse error: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("settings YAML write error: {0}")]
    Write(#[source] serde_yaml::Error),
}

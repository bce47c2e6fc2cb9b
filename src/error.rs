use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("no async runtime available: {0}")]
    Runtime(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

impl Error {
    /// Configuration problems are the only failures a caller can fix by
    /// editing input; everything else is an environment issue.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

use thiserror::Error;

/// Top-level error type for the Viva system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for VivaError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VivaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VivaError {
    fn from(err: toml::de::Error) -> Self {
        VivaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VivaError {
    fn from(err: toml::ser::Error) -> Self {
        VivaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VivaError {
    fn from(err: serde_json::Error) -> Self {
        VivaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Viva operations.
pub type Result<T> = std::result::Result<T, VivaError>;

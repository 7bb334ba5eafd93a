use thiserror::Error;
use viva_backend::BackendError;
use viva_core::VivaError;

/// Errors from the interview engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller supplied malformed or missing context. No backend call is
    /// made for these.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The generation call failed or produced degenerate output.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl From<EngineError> for VivaError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Backend(e) => VivaError::Backend(e.to_string()),
            EngineError::InvalidRequest(msg) => VivaError::Engine(format!("invalid request: {}", msg)),
        }
    }
}

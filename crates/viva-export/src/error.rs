use thiserror::Error;
use viva_core::VivaError;

/// Errors from the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pdf renderer '{0}' unavailable")]
    RendererUnavailable(String),
    #[error("pdf rendering failed: {0}")]
    Renderer(String),
}

impl From<ExportError> for VivaError {
    fn from(err: ExportError) -> Self {
        VivaError::Export(err.to_string())
    }
}

use thiserror::Error;
use viva_core::VivaError;

/// Errors from the generation backend.
///
/// The engine treats every variant uniformly as a failed generation; the
/// variants exist so logs and diagnostics can say what actually happened.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("backend returned no generations")]
    EmptyResponse,
    #[error("backend returned empty text")]
    EmptyOutput,
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Request(err.to_string())
    }
}

impl From<BackendError> for VivaError {
    fn from(err: BackendError) -> Self {
        VivaError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");

        let err = BackendError::Status {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned status 503: overloaded");

        let err = BackendError::MalformedResponse("expected array".to_string());
        assert_eq!(err.to_string(), "malformed response: expected array");

        assert_eq!(
            BackendError::EmptyResponse.to_string(),
            "backend returned no generations"
        );
        assert_eq!(
            BackendError::EmptyOutput.to_string(),
            "backend returned empty text"
        );
    }

    #[test]
    fn test_into_viva_error() {
        let err: VivaError = BackendError::EmptyOutput.into();
        assert!(matches!(err, VivaError::Backend(_)));
        assert!(err.to_string().contains("empty text"));
    }

    #[test]
    fn test_error_is_debug() {
        let err = BackendError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("Status"));
    }
}

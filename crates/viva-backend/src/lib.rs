//! Text-generation backend seam for Viva.
//!
//! The engine only requires one capability: given a prompt string and
//! sampling parameters, return a generated text or fail. This crate defines
//! that seam (`GenerationBackend`), an HTTP implementation targeting an
//! OpenAI-style completions endpoint, and a deterministic mock for tests.

pub mod error;
pub mod http;
pub mod mock;

pub use error::BackendError;
pub use http::HttpBackend;
pub use mock::MockBackend;

use async_trait::async_trait;
use viva_core::GenerationParams;

/// The text-generation capability consumed by the interview engine.
///
/// Implementations own their model/transport state; the engine holds an
/// explicit `Arc<dyn GenerationBackend>` handle (no process-wide singleton).
/// The generate call may block for seconds; it is the engine's only
/// suspension point and carries no engine-level timeout.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Short name identifying the backend, for logs and diagnostics.
    fn name(&self) -> &str;

    /// Generate text from a prompt. Any non-success outcome (transport
    /// failure, API error, malformed or empty response) is a `BackendError`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, BackendError>;

    /// Check whether the backend is reachable and able to generate.
    async fn health_check(&self) -> Result<(), BackendError>;
}

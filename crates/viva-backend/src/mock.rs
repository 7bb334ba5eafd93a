//! Mock generation backend for tests.
//!
//! Two flavors: an echo mode producing a deterministic reply derived from
//! the prompt, and a scripted mode replaying a fixed sequence of outcomes.
//! Identical inputs always produce identical outputs, so engine and export
//! behavior can be tested without a real model.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use viva_core::GenerationParams;

use crate::error::BackendError;
use crate::GenerationBackend;

enum Mode {
    Echo,
    Scripted(Mutex<VecDeque<Result<String, BackendError>>>),
}

/// Deterministic in-memory backend.
pub struct MockBackend {
    mode: Mode,
}

impl MockBackend {
    /// Echo mode: every call succeeds with a reply derived from the prompt.
    pub fn echo() -> Self {
        Self { mode: Mode::Echo }
    }

    /// Scripted mode: replay the given outcomes in order. Once the script is
    /// exhausted, further calls fall back to echo behavior.
    pub fn scripted(outcomes: Vec<Result<String, BackendError>>) -> Self {
        Self {
            mode: Mode::Scripted(Mutex::new(outcomes.into())),
        }
    }

    fn echo_reply(prompt: &str) -> String {
        format!("generated: {}", prompt.trim())
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, BackendError> {
        match &self.mode {
            Mode::Echo => Ok(Self::echo_reply(prompt)),
            Mode::Scripted(queue) => {
                let next = queue
                    .lock()
                    .map_err(|e| BackendError::Request(format!("script lock poisoned: {}", e)))?
                    .pop_front();
                match next {
                    Some(outcome) => outcome,
                    None => Ok(Self::echo_reply(prompt)),
                }
            }
        }
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

//! Interview engine: central coordinator wiring prompt construction, the
//! generation backend, and post-processing.
//!
//! Operations run to completion before the next is accepted; the awaited
//! backend call is the only suspension point. The engine never mutates a
//! session store — callers append records only after a successful result.

use std::sync::Arc;

use tracing::{debug, warn};
use viva_backend::{BackendError, GenerationBackend};
use viva_core::{GenerationParams, GenerationRequest, GenerationResult, Intent, QuestionRecord};

use crate::error::EngineError;
use crate::prompt::{PromptBuilder, TemplateStyle};

/// Placeholder question text for failed generations inside a batch.
const BATCH_ERROR_PLACEHOLDER: &str = "Error generating question";

/// Diagnostic prompts probed verbatim against the backend.
const PROBE_PROMPTS: [&str; 4] = [
    "What is supervised learning?",
    "Question: What is the difference between bias and variance?",
    "ML Interview Question:",
    "Ask me about machine learning:",
];

/// One entry of the diagnostic battery: the prompt that was sent and what
/// came back, reported independently of the other entries.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub label: String,
    pub prompt: String,
    pub result: Result<String, BackendError>,
}

/// The interview session engine.
pub struct InterviewEngine {
    backend: Arc<dyn GenerationBackend>,
    builder: PromptBuilder,
}

impl InterviewEngine {
    /// Create an engine over an owned backend handle.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            builder: PromptBuilder::new(),
        }
    }

    /// Create an engine with a specific prompt builder.
    pub fn with_builder(backend: Arc<dyn GenerationBackend>, builder: PromptBuilder) -> Self {
        Self { backend, builder }
    }

    /// Generate one interview question. With `practice` set, the output is
    /// truncated through the first `?` so the answer does not bleed in.
    pub async fn generate_question(
        &self,
        practice: bool,
    ) -> Result<GenerationResult, EngineError> {
        let request = if practice {
            GenerationRequest::practice_question()
        } else {
            GenerationRequest::ask_question()
        };
        self.run(&self.builder, &request).await
    }

    /// Generate one interview question using an explicit template style.
    pub async fn generate_question_styled(
        &self,
        practice: bool,
        style: TemplateStyle,
    ) -> Result<GenerationResult, EngineError> {
        let request = if practice {
            GenerationRequest::practice_question()
        } else {
            GenerationRequest::ask_question()
        };
        self.run(&PromptBuilder::with_style(style), &request).await
    }

    /// Generate an answer to the given question.
    pub async fn answer_question(&self, question: &str) -> Result<GenerationResult, EngineError> {
        self.run(&self.builder, &GenerationRequest::answer(question))
            .await
    }

    /// Review a candidate answer: 0-10 score plus a correction if wrong.
    pub async fn review_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<GenerationResult, EngineError> {
        self.run(&self.builder, &GenerationRequest::review(question, answer))
            .await
    }

    /// Generate `n` questions sequentially. Always returns exactly `n`
    /// records: a failed generation degrades to a placeholder error record
    /// instead of aborting the batch. Record ids are 1-based positions.
    pub async fn generate_batch(&self, n: usize) -> Vec<QuestionRecord> {
        let mut records = Vec::with_capacity(n);
        for i in 1..=n {
            debug!(position = i, total = n, "Generating batch question");
            let question = match self.generate_question(false).await {
                Ok(result) => result.cleaned_text,
                Err(e) => {
                    warn!(position = i, error = %e, "Batch generation failed; recording placeholder");
                    BATCH_ERROR_PLACEHOLDER.to_string()
                }
            };
            records.push(QuestionRecord::new(i, question, None));
        }
        records
    }

    /// Run a fixed battery of diagnostic prompts against the backend and
    /// report each outcome independently. Validates backend health without
    /// touching any session state.
    pub async fn probe(&self) -> Vec<ProbeOutcome> {
        let mut outcomes = Vec::new();

        let basic_params = GenerationParams {
            max_new_tokens: 50,
            ..GenerationParams::default()
        };
        let basic_prompt = "What is Machine Learning?";
        outcomes.push(ProbeOutcome {
            label: "basic-generation".to_string(),
            prompt: basic_prompt.to_string(),
            result: self.backend.generate(basic_prompt, &basic_params).await,
        });

        // Both question templates, in practice mode.
        for (label, style) in [
            ("question-direct", TemplateStyle::Direct),
            ("question-conversational", TemplateStyle::Conversational),
        ] {
            let request = GenerationRequest::practice_question();
            match PromptBuilder::with_style(style).build(&request) {
                Ok(built) => outcomes.push(ProbeOutcome {
                    label: label.to_string(),
                    prompt: built.prompt.clone(),
                    result: self.backend.generate(&built.prompt, &built.params).await,
                }),
                Err(e) => outcomes.push(ProbeOutcome {
                    label: label.to_string(),
                    prompt: String::new(),
                    result: Err(BackendError::Request(e.to_string())),
                }),
            }
        }

        let short_params = GenerationParams {
            max_new_tokens: 100,
            ..GenerationParams::default()
        };
        for (i, prompt) in PROBE_PROMPTS.iter().enumerate() {
            outcomes.push(ProbeOutcome {
                label: format!("test-prompt-{}", i + 1),
                prompt: prompt.to_string(),
                result: self.backend.generate(prompt, &short_params).await,
            });
        }

        outcomes
    }

    /// Build, generate, and post-process one request.
    async fn run(
        &self,
        builder: &PromptBuilder,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, EngineError> {
        let built = builder.build(request)?;
        let raw_text = self.backend.generate(&built.prompt, &built.params).await?;

        match clean(&raw_text, request.intent) {
            Some(cleaned_text) => Ok(GenerationResult {
                raw_text,
                cleaned_text,
            }),
            // Empty output after cleaning counts as a failed generation.
            None => Err(EngineError::Backend(BackendError::EmptyOutput)),
        }
    }
}

/// Post-process raw backend output: trim whitespace and, for practice
/// questions, truncate through (and including) the first `?`. Returns `None`
/// when nothing survives cleaning.
fn clean(raw: &str, intent: Intent) -> Option<String> {
    let trimmed = raw.trim();
    let cleaned = if intent == Intent::PracticeQuestion {
        match trimmed.find('?') {
            Some(idx) => &trimmed[..=idx],
            None => trimmed,
        }
    } else {
        trimmed
    };
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

//! Prompt construction.
//!
//! Pure mapping from an intent plus contextual arguments to a backend prompt
//! string and a parameter set. No I/O; identical inputs always produce
//! identical output.

use viva_core::{GenerationParams, GenerationRequest, Intent};

use crate::error::EngineError;

/// Fixed interviewer-persona instruction for question generation.
const ASK_QUESTION_PROMPT: &str = "As a machine learning interviewer, ask one \
challenging interview question and provide a detailed answer.\n\nQuestion:";

/// System message for the conversational template.
const CONVERSATIONAL_SYSTEM: &str = "You are an experienced ML interviewer.";

/// Token budget for the conversational template.
const CONVERSATIONAL_MAX_TOKENS: u32 = 256;
const CONVERSATIONAL_TEMPERATURE: f32 = 0.8;

/// Which question-generation template to use.
///
/// The conversational flavor wraps the instruction in a short
/// `System:/User:/Assistant:` transcript and samples with its own profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateStyle {
    #[default]
    Direct,
    Conversational,
}

/// A prompt string plus the parameters to send with it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPrompt {
    pub prompt: String,
    pub params: GenerationParams,
}

/// Builds backend prompts from generation requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    style: TemplateStyle,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: TemplateStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> TemplateStyle {
        self.style
    }

    /// Map a request to a prompt and parameter set.
    ///
    /// Fails fast with `InvalidRequest` when the request's parameters are out
    /// of range or a required context key is absent; no defaults are ever
    /// substituted for missing context.
    pub fn build(&self, request: &GenerationRequest) -> Result<BuiltPrompt, EngineError> {
        request
            .params
            .validate()
            .map_err(EngineError::InvalidRequest)?;

        let missing = request.missing_context();
        if !missing.is_empty() {
            return Err(EngineError::InvalidRequest(format!(
                "missing context key(s) for {:?}: {}",
                request.intent,
                missing.join(", ")
            )));
        }

        let built = match request.intent {
            Intent::AskQuestion | Intent::PracticeQuestion => match self.style {
                TemplateStyle::Direct => BuiltPrompt {
                    prompt: ASK_QUESTION_PROMPT.to_string(),
                    params: request.params,
                },
                TemplateStyle::Conversational => {
                    let user_msg = if request.intent == Intent::PracticeQuestion {
                        "Generate a machine learning question for interview practice."
                    } else {
                        "Ask one challenging machine learning interview question."
                    };
                    BuiltPrompt {
                        prompt: format!(
                            "System: {}\nUser: {}\nAssistant:",
                            CONVERSATIONAL_SYSTEM, user_msg
                        ),
                        params: GenerationParams {
                            max_new_tokens: CONVERSATIONAL_MAX_TOKENS,
                            temperature: CONVERSATIONAL_TEMPERATURE,
                            ..request.params
                        },
                    }
                }
            },
            Intent::Answer => {
                // Presence checked above.
                let question = request.context_value("question").unwrap_or_default();
                BuiltPrompt {
                    prompt: format!(
                        "Answer this machine learning question clearly and concisely:\n\n\
                         Question: {}\n\nAnswer:",
                        question
                    ),
                    params: request.params,
                }
            }
            Intent::Review => {
                let question = request.context_value("question").unwrap_or_default();
                let answer = request.context_value("answer").unwrap_or_default();
                BuiltPrompt {
                    prompt: format!(
                        "Review this machine learning interview answer:\n\
                         Question: {}\n\
                         Candidate Answer: {}\n\
                         Rate the candidate answer from 0 to 10 and correct it if it is wrong:\n\
                         Review:",
                        question, answer
                    ),
                    params: request.params,
                }
            }
        };

        Ok(built)
    }
}

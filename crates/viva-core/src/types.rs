//! Shared types for the interview session engine.
//!
//! Records are append-only: once created they are never mutated, and their
//! `generated_at` timestamps are non-decreasing within a store partition.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The categorical purpose of a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Ask one challenging interview question (with a detailed answer).
    AskQuestion,
    /// Answer a caller-supplied question.
    Answer,
    /// Score and correct a candidate answer.
    Review,
    /// Same instruction as `AskQuestion`; output is truncated at the first
    /// `?` during post-processing so the answer does not bleed in.
    PracticeQuestion,
}

impl Intent {
    /// Context keys that must be present for this intent.
    pub fn required_context(&self) -> &'static [&'static str] {
        match self {
            Intent::AskQuestion | Intent::PracticeQuestion => &[],
            Intent::Answer => &["question"],
            Intent::Review => &["question", "answer"],
        }
    }
}

/// Sampling parameters forwarded to the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
        }
    }
}

impl GenerationParams {
    /// Validate the parameter ranges: `max_new_tokens` positive,
    /// `temperature` in [0, 2], `top_p` in (0, 1].
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_new_tokens == 0 {
            return Err("max_new_tokens must be positive".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be in [0, 2], got {}",
                self.temperature
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(format!("top_p must be in (0, 1], got {}", self.top_p));
        }
        Ok(())
    }
}

/// A fully specified generation call: intent, named context inputs, and
/// sampling parameters. Immutable once built — use the intent constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub intent: Intent,
    pub context: HashMap<String, String>,
    pub params: GenerationParams,
}

impl GenerationRequest {
    /// Request one challenging interview question.
    pub fn ask_question() -> Self {
        Self {
            intent: Intent::AskQuestion,
            context: HashMap::new(),
            params: GenerationParams::default(),
        }
    }

    /// Request a practice question (truncated at the first `?` after
    /// generation).
    pub fn practice_question() -> Self {
        Self {
            intent: Intent::PracticeQuestion,
            context: HashMap::new(),
            params: GenerationParams::default(),
        }
    }

    /// Request an answer to the given question.
    pub fn answer(question: &str) -> Self {
        let mut context = HashMap::new();
        context.insert("question".to_string(), question.to_string());
        Self {
            intent: Intent::Answer,
            context,
            params: GenerationParams::default(),
        }
    }

    /// Request a 0-10 review of a candidate answer.
    pub fn review(question: &str, answer: &str) -> Self {
        let mut context = HashMap::new();
        context.insert("question".to_string(), question.to_string());
        context.insert("answer".to_string(), answer.to_string());
        Self {
            intent: Intent::Review,
            context,
            params: GenerationParams::default(),
        }
    }

    /// Look up a context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(|s| s.as_str())
    }

    /// Context keys required for this request but absent from it.
    pub fn missing_context(&self) -> Vec<&'static str> {
        self.intent
            .required_context()
            .iter()
            .filter(|key| !self.context.contains_key(**key))
            .copied()
            .collect()
    }
}

/// The outcome of a successful generation: the backend's raw text and the
/// post-processed text. `cleaned_text` is never empty on a success path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub raw_text: String,
    pub cleaned_text: String,
}

/// Which partition of the session a record (or document) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Question,
    Qa,
    Practice,
}

/// A generated interview question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 1-based position within the batch (or partition) that produced it.
    pub id: usize,
    pub question: String,
    pub category: Option<String>,
    pub generated_at: DateTime<Local>,
}

impl QuestionRecord {
    /// Create a record stamped with the current local time.
    pub fn new(id: usize, question: impl Into<String>, category: Option<String>) -> Self {
        Self {
            id,
            question: question.into(),
            category,
            generated_at: Local::now(),
        }
    }
}

/// A question/answer exchange, with an optional review appended by the
/// scored-review flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
    pub review: Option<String>,
    pub generated_at: DateTime<Local>,
}

impl QaRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        review: Option<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            review,
            generated_at: Local::now(),
        }
    }
}

/// A guided-practice exchange: generated question, the model's answer, and
/// optionally the user's attempt and its review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub question: String,
    pub model_answer: String,
    pub user_answer: Option<String>,
    pub review: Option<String>,
    pub generated_at: DateTime<Local>,
}

impl PracticeRecord {
    pub fn new(
        question: impl Into<String>,
        model_answer: impl Into<String>,
        user_answer: Option<String>,
        review: Option<String>,
    ) -> Self {
        Self {
            question: question.into(),
            model_answer: model_answer.into(),
            user_answer,
            review,
            generated_at: Local::now(),
        }
    }
}

/// Tagged union over the three record variants. One shared renderer
/// dispatches on the variant at export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SessionRecord {
    Question(QuestionRecord),
    Qa(QaRecord),
    Practice(PracticeRecord),
}

impl SessionRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            SessionRecord::Question(_) => RecordKind::Question,
            SessionRecord::Qa(_) => RecordKind::Qa,
            SessionRecord::Practice(_) => RecordKind::Practice,
        }
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        match self {
            SessionRecord::Question(r) => r.generated_at,
            SessionRecord::Qa(r) => r.generated_at,
            SessionRecord::Practice(r) => r.generated_at,
        }
    }
}

impl From<QuestionRecord> for SessionRecord {
    fn from(r: QuestionRecord) -> Self {
        SessionRecord::Question(r)
    }
}

impl From<QaRecord> for SessionRecord {
    fn from(r: QaRecord) -> Self {
        SessionRecord::Qa(r)
    }
}

impl From<PracticeRecord> for SessionRecord {
    fn from(r: PracticeRecord) -> Self {
        SessionRecord::Practice(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let p = GenerationParams::default();
        assert_eq!(p.max_new_tokens, 512);
        assert!((p.temperature - 0.7).abs() < f32::EPSILON);
        assert!((p.top_p - 0.9).abs() < f32::EPSILON);
        assert!(p.do_sample);
    }

    #[test]
    fn test_params_validate_ok() {
        assert!(GenerationParams::default().validate().is_ok());
    }

    #[test]
    fn test_params_validate_zero_tokens() {
        let p = GenerationParams {
            max_new_tokens: 0,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_params_validate_temperature_range() {
        let p = GenerationParams {
            temperature: 2.1,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_err());

        let p = GenerationParams {
            temperature: -0.1,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_err());

        let p = GenerationParams {
            temperature: 2.0,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_params_validate_top_p_range() {
        let p = GenerationParams {
            top_p: 0.0,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_err());

        let p = GenerationParams {
            top_p: 1.0,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_ok());

        let p = GenerationParams {
            top_p: 1.01,
            ..GenerationParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_required_context_per_intent() {
        assert!(Intent::AskQuestion.required_context().is_empty());
        assert!(Intent::PracticeQuestion.required_context().is_empty());
        assert_eq!(Intent::Answer.required_context(), &["question"]);
        assert_eq!(Intent::Review.required_context(), &["question", "answer"]);
    }

    #[test]
    fn test_request_constructors_populate_context() {
        let req = GenerationRequest::answer("What is overfitting?");
        assert_eq!(req.intent, Intent::Answer);
        assert_eq!(req.context_value("question"), Some("What is overfitting?"));
        assert!(req.missing_context().is_empty());

        let req = GenerationRequest::review("Q", "A");
        assert_eq!(req.context_value("question"), Some("Q"));
        assert_eq!(req.context_value("answer"), Some("A"));
        assert!(req.missing_context().is_empty());
    }

    #[test]
    fn test_missing_context_detected() {
        let mut req = GenerationRequest::review("Q", "A");
        req.context.remove("answer");
        assert_eq!(req.missing_context(), vec!["answer"]);
    }

    #[test]
    fn test_ask_question_needs_no_context() {
        let req = GenerationRequest::ask_question();
        assert!(req.context.is_empty());
        assert!(req.missing_context().is_empty());
    }

    #[test]
    fn test_session_record_kind_dispatch() {
        let q: SessionRecord = QuestionRecord::new(1, "Q?", None).into();
        let qa: SessionRecord = QaRecord::new("Q?", "A.", None).into();
        let p: SessionRecord = PracticeRecord::new("Q?", "A.", None, None).into();
        assert_eq!(q.kind(), RecordKind::Question);
        assert_eq!(qa.kind(), RecordKind::Qa);
        assert_eq!(p.kind(), RecordKind::Practice);
    }

    #[test]
    fn test_question_record_serde_roundtrip() {
        let rec = QuestionRecord::new(1, "What is overfitting?", Some("generalization".into()));
        let json = serde_json::to_string(&rec).unwrap();
        let back: QuestionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }

    #[test]
    fn test_session_record_serde_tagged() {
        let rec: SessionRecord = QaRecord::new("Q?", "A.", Some("8/10".into())).into();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"kind\":\"Qa\""));
    }

    #[test]
    fn test_record_timestamps_are_recent() {
        let before = Local::now();
        let rec = QaRecord::new("Q?", "A.", None);
        let after = Local::now();
        assert!(rec.generated_at >= before);
        assert!(rec.generated_at <= after);
    }
}

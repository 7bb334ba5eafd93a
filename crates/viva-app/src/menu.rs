//! Interactive menu loop and the session flows behind it.
//!
//! The flows own the "append only after success" protocol: a record reaches
//! the session store only once every generation it depends on has succeeded,
//! so a backend failure never leaves partial state behind.

use std::io::Write;
use std::path::PathBuf;

use viva_core::{PracticeRecord, QaRecord, QuestionRecord, RecordKind};
use viva_engine::{EngineError, InterviewEngine};
use viva_export::{ExportError, PdfRenderer, SessionExporter};
use viva_session::SessionStore;

/// Engine, store, and exporter wired together for one session.
pub struct App {
    pub engine: InterviewEngine,
    pub store: SessionStore,
    pub exporter: SessionExporter,
}

impl App {
    pub fn new(engine: InterviewEngine, exporter: SessionExporter) -> Self {
        Self {
            engine,
            store: SessionStore::new(),
            exporter,
        }
    }

    /// Generate one question and append it to the question partition.
    pub async fn single_question_flow(&mut self) -> Result<QuestionRecord, EngineError> {
        let result = self.engine.generate_question(false).await?;
        let record = QuestionRecord::new(self.store.next_question_id(), result.cleaned_text, None);
        self.store.append_question(record.clone());
        Ok(record)
    }

    /// Generate a batch of questions and append all of them (placeholders
    /// included, so the exported document reflects what actually happened).
    pub async fn batch_flow(&mut self, count: usize) -> Vec<QuestionRecord> {
        let records = self.engine.generate_batch(count).await;
        for record in &records {
            self.store.append_question(record.clone());
        }
        records
    }

    /// Answer a question and append the exchange.
    pub async fn answer_flow(&mut self, question: &str) -> Result<String, EngineError> {
        let result = self.engine.answer_question(question).await?;
        self.store
            .append_qa(QaRecord::new(question, result.cleaned_text.clone(), None));
        Ok(result.cleaned_text)
    }

    /// Review a candidate answer and append the exchange with the review
    /// populated.
    pub async fn review_flow(
        &mut self,
        question: &str,
        user_answer: &str,
    ) -> Result<String, EngineError> {
        let result = self.engine.review_answer(question, user_answer).await?;
        self.store.append_qa(QaRecord::new(
            question,
            user_answer,
            Some(result.cleaned_text.clone()),
        ));
        Ok(result.cleaned_text)
    }

    /// One guided-practice exchange: generate a practice question and the
    /// model's answer; when the user attempted an answer, review it too.
    pub async fn practice_flow(
        &mut self,
        user_answer: Option<&str>,
    ) -> Result<PracticeRecord, EngineError> {
        let question = self.engine.generate_question(true).await?;
        let model_answer = self.engine.answer_question(&question.cleaned_text).await?;

        let (user_answer, review) = match user_answer {
            Some(attempt) => {
                let review = self
                    .engine
                    .review_answer(&question.cleaned_text, attempt)
                    .await?;
                (Some(attempt.to_string()), Some(review.cleaned_text))
            }
            None => (None, None),
        };

        let record = PracticeRecord::new(
            question.cleaned_text,
            model_answer.cleaned_text,
            user_answer,
            review,
        );
        self.store.append_practice(record.clone());
        Ok(record)
    }

    /// Export one partition of the current session.
    pub fn export_current(&self, kind: RecordKind) -> Result<PathBuf, ExportError> {
        match kind {
            RecordKind::Question => self.exporter.export_questions(self.store.questions(), None),
            RecordKind::Qa => self.exporter.export_qa(self.store.qa(), None),
            RecordKind::Practice => self.exporter.export_practice(self.store.practice(), None),
        }
    }
}

/// Read one trimmed line from stdin after printing a prompt.
fn prompt_line(prompt: &str) -> std::io::Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Export a partition, then offer PDF derivation; failures are printed and
/// the session keeps running.
async fn export_with_prompt(app: &App, kind: RecordKind, renderer: &dyn PdfRenderer) {
    if app.store.is_empty(kind) {
        println!("Nothing to save yet.");
        return;
    }
    let md_path = match app.export_current(kind) {
        Ok(path) => {
            println!("Saved to: {}", path.display());
            path
        }
        Err(e) => {
            println!("Export failed: {}", e);
            return;
        }
    };

    match prompt_line("Also save as PDF? (y/n): ") {
        Ok(choice) if choice.eq_ignore_ascii_case("y") => {
            match app.exporter.export_pdf(renderer, &md_path).await {
                Ok(pdf) => println!("PDF saved to: {}", pdf.display()),
                Err(e) => println!("PDF conversion failed: {}", e),
            }
        }
        _ => {}
    }
}

async fn question_generation_mode(app: &mut App, renderer: &dyn PdfRenderer) {
    loop {
        println!("\n--- Question Generation ---");
        println!("1. Generate single question");
        println!("2. Generate batch of questions");
        println!("3. Save questions");
        println!("4. Back");

        match prompt_line("Choice: ").as_deref() {
            Ok("1") => match app.single_question_flow().await {
                Ok(record) => println!("\nGenerated question:\n{}", record.question),
                Err(e) => println!("Generation failed: {}", e),
            },
            Ok("2") => {
                let count = prompt_line("How many questions? (default 5): ")
                    .ok()
                    .and_then(|s| if s.is_empty() { None } else { s.parse().ok() })
                    .unwrap_or(5);
                let records = app.batch_flow(count).await;
                println!("\nGenerated {} questions:", records.len());
                for record in &records {
                    println!("\n{}. {}", record.id, record.question);
                }
            }
            Ok("3") => export_with_prompt(app, RecordKind::Question, renderer).await,
            Ok("4") => break,
            _ => println!("Invalid choice."),
        }
    }
}

async fn answer_review_mode(app: &mut App, renderer: &dyn PdfRenderer) {
    loop {
        println!("\n--- Answer Review ---");
        println!("1. Ask a question and get an answer");
        println!("2. Review your answer to a question");
        println!("3. Save Q&A session");
        println!("4. Back");

        match prompt_line("Choice: ").as_deref() {
            Ok("1") => {
                let question = match prompt_line("Enter your ML question: ") {
                    Ok(q) if !q.is_empty() => q,
                    _ => continue,
                };
                println!("\nGenerating answer...");
                match app.answer_flow(&question).await {
                    Ok(answer) => println!("\nAnswer: {}", answer),
                    Err(e) => println!("Answer failed: {}", e),
                }
            }
            Ok("2") => {
                let question = match prompt_line("Enter the question: ") {
                    Ok(q) if !q.is_empty() => q,
                    _ => continue,
                };
                let answer = match prompt_line("Enter your answer: ") {
                    Ok(a) if !a.is_empty() => a,
                    _ => continue,
                };
                println!("\nGenerating review...");
                match app.review_flow(&question, &answer).await {
                    Ok(review) => println!("\nReview: {}", review),
                    Err(e) => println!("Review failed: {}", e),
                }
            }
            Ok("3") => export_with_prompt(app, RecordKind::Qa, renderer).await,
            Ok("4") => break,
            _ => println!("Invalid choice."),
        }
    }
}

async fn practice_mode(app: &mut App, renderer: &dyn PdfRenderer) {
    loop {
        println!("\n--- Practice ---");
        println!("1. Practice a generated question");
        println!("2. Save practice session");
        println!("3. Back");

        match prompt_line("Choice: ").as_deref() {
            Ok("1") => {
                let attempt = match prompt_line("Your answer (empty to just see the model's): ") {
                    Ok(a) => a,
                    Err(_) => continue,
                };
                let attempt = if attempt.is_empty() {
                    None
                } else {
                    Some(attempt.as_str())
                };
                match app.practice_flow(attempt).await {
                    Ok(record) => {
                        println!("\nQuestion: {}", record.question);
                        println!("\nModel's answer: {}", record.model_answer);
                        if let Some(review) = record.review {
                            println!("\nReview: {}", review);
                        }
                    }
                    Err(e) => println!("Practice failed: {}", e),
                }
            }
            Ok("2") => export_with_prompt(app, RecordKind::Practice, renderer).await,
            Ok("3") => break,
            _ => println!("Invalid choice."),
        }
    }
}

/// Top-level interactive loop.
pub async fn run(mut app: App, renderer: &dyn PdfRenderer, base_model: &str) {
    println!("Welcome to Viva!");
    loop {
        println!("\n{}", "=".repeat(50));
        println!("VIVA — ML INTERVIEW ASSISTANT");
        println!("Base model: {}", base_model);
        println!("{}", "=".repeat(50));
        println!("1. Question generation mode");
        println!("2. Answer review mode");
        println!("3. Practice mode");
        println!("4. Exit");

        match prompt_line("\nSelect mode (1-4): ").as_deref() {
            Ok("1") => question_generation_mode(&mut app, renderer).await,
            Ok("2") => answer_review_mode(&mut app, renderer).await,
            Ok("3") => practice_mode(&mut app, renderer).await,
            Ok("4") => {
                println!("Goodbye!");
                break;
            }
            Err(_) => break, // stdin closed
            _ => println!("Invalid choice."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use viva_backend::{BackendError, MockBackend};

    fn app_with(backend: MockBackend, dir: &std::path::Path) -> App {
        App::new(
            InterviewEngine::new(Arc::new(backend)),
            SessionExporter::new(dir),
        )
    }

    #[tokio::test]
    async fn test_answer_flow_appends_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(MockBackend::echo(), dir.path());

        let answer = app.answer_flow("What is gradient descent?").await.unwrap();
        assert!(!answer.is_empty());
        assert_eq!(app.store.qa().len(), 1);
        assert_eq!(app.store.qa()[0].question, "What is gradient descent?");
        assert!(app.store.qa()[0].review.is_none());
    }

    #[tokio::test]
    async fn test_answer_flow_failure_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let backend =
            MockBackend::scripted(vec![Err(BackendError::Request("backend down".to_string()))]);
        let mut app = app_with(backend, dir.path());

        let result = app.answer_flow("What is gradient descent?").await;
        assert!(result.is_err());
        assert!(app.store.is_empty(RecordKind::Qa));
        assert!(app.store.is_empty(RecordKind::Question));
        assert!(app.store.is_empty(RecordKind::Practice));
    }

    #[tokio::test]
    async fn test_review_flow_appends_with_review() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(MockBackend::echo(), dir.path());

        let review = app
            .review_flow("What is dropout?", "Turning off neurons.")
            .await
            .unwrap();
        assert_eq!(app.store.qa().len(), 1);
        let record = &app.store.qa()[0];
        assert_eq!(record.answer, "Turning off neurons.");
        assert_eq!(record.review.as_deref(), Some(review.as_str()));
    }

    #[tokio::test]
    async fn test_single_question_flow_numbers_sequentially() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(MockBackend::echo(), dir.path());

        let first = app.single_question_flow().await.unwrap();
        let second = app.single_question_flow().await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(app.store.questions().len(), 2);
    }

    #[tokio::test]
    async fn test_batch_flow_appends_all_records() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MockBackend::scripted(vec![
            Ok("One?".to_string()),
            Err(BackendError::EmptyResponse),
            Ok("Three?".to_string()),
        ]);
        let mut app = app_with(backend, dir.path());

        let records = app.batch_flow(3).await;
        assert_eq!(records.len(), 3);
        assert_eq!(app.store.questions().len(), 3);
        // The middle placeholder is preserved in the store.
        assert_eq!(app.store.questions()[1].question, "Error generating question");
    }

    #[tokio::test]
    async fn test_practice_flow_without_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MockBackend::scripted(vec![
            Ok("What is a kernel? And more trailing text".to_string()),
            Ok("A similarity function.".to_string()),
        ]);
        let mut app = app_with(backend, dir.path());

        let record = app.practice_flow(None).await.unwrap();
        assert_eq!(record.question, "What is a kernel?");
        assert_eq!(record.model_answer, "A similarity function.");
        assert!(record.user_answer.is_none());
        assert!(record.review.is_none());
        assert_eq!(app.store.practice().len(), 1);
    }

    #[tokio::test]
    async fn test_practice_flow_with_attempt_gets_review() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MockBackend::scripted(vec![
            Ok("What is a kernel?".to_string()),
            Ok("A similarity function.".to_string()),
            Ok("6/10, partially correct.".to_string()),
        ]);
        let mut app = app_with(backend, dir.path());

        let record = app.practice_flow(Some("A function")).await.unwrap();
        assert_eq!(record.user_answer.as_deref(), Some("A function"));
        assert_eq!(record.review.as_deref(), Some("6/10, partially correct."));
    }

    #[tokio::test]
    async fn test_practice_flow_mid_failure_appends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // Question succeeds, model answer fails: no partial record.
        let backend = MockBackend::scripted(vec![
            Ok("What is a kernel?".to_string()),
            Err(BackendError::Request("timeout".to_string())),
        ]);
        let mut app = app_with(backend, dir.path());

        assert!(app.practice_flow(None).await.is_err());
        assert!(app.store.is_empty(RecordKind::Practice));
    }

    #[tokio::test]
    async fn test_export_current_writes_session_partition() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(MockBackend::echo(), dir.path());
        app.answer_flow("What is overfitting?").await.unwrap();

        let path = app.export_current(RecordKind::Qa).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("# Q&A Session"));
        assert!(content.contains("**Question:** What is overfitting?"));
    }
}

//! Append-only session store.
//!
//! Three ordered partitions, one per record variant. There is no remove or
//! update operation: corrections are modeled as new records, preserving
//! insertion order and the full audit history. Mutation goes through
//! `&mut self`, so a store has exactly one writer; callers that need to
//! share a store across tasks must serialize access themselves.

use chrono::{DateTime, Local};
use tracing::debug;
use uuid::Uuid;
use viva_core::{PracticeRecord, QaRecord, QuestionRecord, RecordKind};

/// The in-memory, append-only accumulation of records for one run.
#[derive(Debug)]
pub struct SessionStore {
    id: Uuid,
    started_at: DateTime<Local>,
    questions: Vec<QuestionRecord>,
    qa: Vec<QaRecord>,
    practice: Vec<PracticeRecord>,
}

impl SessionStore {
    /// Create an empty store for a new session.
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Session store created");
        Self {
            id,
            started_at: Local::now(),
            questions: Vec::new(),
            qa: Vec::new(),
            practice: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Append a question record. O(1), preserves insertion order.
    pub fn append_question(&mut self, record: QuestionRecord) {
        self.questions.push(record);
    }

    /// Append a Q&A record.
    pub fn append_qa(&mut self, record: QaRecord) {
        self.qa.push(record);
    }

    /// Append a practice record.
    pub fn append_practice(&mut self, record: PracticeRecord) {
        self.practice.push(record);
    }

    /// Ordered view of the question partition.
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// Ordered view of the Q&A partition.
    pub fn qa(&self) -> &[QaRecord] {
        &self.qa
    }

    /// Ordered view of the practice partition.
    pub fn practice(&self) -> &[PracticeRecord] {
        &self.practice
    }

    pub fn is_empty(&self, kind: RecordKind) -> bool {
        self.len(kind) == 0
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Question => self.questions.len(),
            RecordKind::Qa => self.qa.len(),
            RecordKind::Practice => self.practice.len(),
        }
    }

    /// 1-based id for the next question record appended to this store.
    pub fn next_question_id(&self) -> usize {
        self.questions.len() + 1
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

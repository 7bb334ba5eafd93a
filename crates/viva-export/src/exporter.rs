//! Document export.
//!
//! Documents are constructed fully in memory and written in one shot, so a
//! write failure never leaves a truncated file behind. Exports read a
//! snapshot of the records passed in; they never mutate session state.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;
use viva_core::{PracticeRecord, QaRecord, QuestionRecord, RecordKind, SessionRecord};

use crate::error::ExportError;
use crate::markdown::render;
use crate::pdf::PdfRenderer;

/// Filename prefix per record kind.
fn file_prefix(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Question => "ml_questions",
        RecordKind::Qa => "qa_session",
        RecordKind::Practice => "practice_session",
    }
}

/// Writes session records to markdown documents in an output directory.
pub struct SessionExporter {
    output_dir: PathBuf,
}

impl SessionExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export records of one kind to a markdown document.
    ///
    /// With no destination, the filename is synthesized from the kind's
    /// prefix and the current timestamp (`prefix_YYYYMMDD_HHMMSS.md`).
    /// Collisions within one second across process runs are an accepted
    /// limitation of that scheme.
    pub fn export(
        &self,
        kind: RecordKind,
        records: &[SessionRecord],
        destination: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let now = Local::now();
        let content = render(kind, records, now);

        let path = match destination {
            Some(dest) => dest.to_path_buf(),
            None => self.output_dir.join(format!(
                "{}_{}.md",
                file_prefix(kind),
                now.format("%Y%m%d_%H%M%S")
            )),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&path, content)?;
        info!(path = %path.display(), records = records.len(), "Session exported");
        Ok(path)
    }

    /// Export question records.
    pub fn export_questions(
        &self,
        records: &[QuestionRecord],
        destination: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let records: Vec<SessionRecord> =
            records.iter().cloned().map(SessionRecord::Question).collect();
        self.export(RecordKind::Question, &records, destination)
    }

    /// Export Q&A records.
    pub fn export_qa(
        &self,
        records: &[QaRecord],
        destination: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let records: Vec<SessionRecord> = records.iter().cloned().map(SessionRecord::Qa).collect();
        self.export(RecordKind::Qa, &records, destination)
    }

    /// Export practice records.
    pub fn export_practice(
        &self,
        records: &[PracticeRecord],
        destination: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let records: Vec<SessionRecord> =
            records.iter().cloned().map(SessionRecord::Practice).collect();
        self.export(RecordKind::Practice, &records, destination)
    }

    /// Derive a PDF from an existing markdown document, written alongside it
    /// with the same base name. Renderer failures are typed errors; callers
    /// report them and keep the session running.
    pub async fn export_pdf(
        &self,
        renderer: &dyn PdfRenderer,
        markdown_path: &Path,
    ) -> Result<PathBuf, ExportError> {
        if !markdown_path.is_file() {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("markdown source not found: {}", markdown_path.display()),
            )));
        }

        let pdf_path = markdown_path.with_extension("pdf");
        renderer.render(markdown_path, &pdf_path).await?;
        info!(path = %pdf_path.display(), "PDF exported");
        Ok(pdf_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::CommandPdfRenderer;

    fn sample_questions() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new(1, "What is overfitting?", None),
            QuestionRecord::new(2, "Explain dropout.", Some("regularization".into())),
        ]
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let path = exporter.export_questions(&sample_questions(), None).unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Machine Learning Interview Questions"));
        assert!(content.contains("What is overfitting?"));
    }

    #[test]
    fn test_default_filename_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let path = exporter.export_questions(&sample_questions(), None).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("ml_questions_"));
        assert!(name.ends_with(".md"));
        // prefix + _YYYYMMDD_HHMMSS.md
        assert_eq!(name.len(), "ml_questions_".len() + 15 + 3);
    }

    #[test]
    fn test_kind_specific_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());

        let qa = vec![QaRecord::new("Q?", "A.", None)];
        let path = exporter.export_qa(&qa, None).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("qa_session_"));

        let practice = vec![PracticeRecord::new("Q?", "A.", None, None)];
        let path = exporter.export_practice(&practice, None).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("practice_session_"));
    }

    #[test]
    fn test_explicit_destination_respected() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("my_questions.md");
        let exporter = SessionExporter::new(dir.path());
        let path = exporter
            .export_questions(&sample_questions(), Some(&dest))
            .unwrap();
        assert_eq!(path, dest);
        assert!(dest.exists());
    }

    #[test]
    fn test_export_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("does").join("not").join("exist");
        let exporter = SessionExporter::new(&nested);
        let path = exporter.export_questions(&sample_questions(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reexport_identical_except_session_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let records = sample_questions();
        let dest = dir.path().join("out.md");

        let first = {
            exporter.export_questions(&records, Some(&dest)).unwrap();
            std::fs::read_to_string(&dest).unwrap()
        };
        let second = {
            exporter.export_questions(&records, Some(&dest)).unwrap();
            std::fs::read_to_string(&dest).unwrap()
        };

        let first_lines: Vec<&str> = first.lines().collect();
        let second_lines: Vec<&str> = second.lines().collect();
        assert_eq!(first_lines.len(), second_lines.len());
        for (a, b) in first_lines.iter().zip(second_lines.iter()) {
            if a.starts_with("Generated on:") {
                assert!(b.starts_with("Generated on:"));
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_export_empty_records_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let path = exporter.export_qa(&[], None).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Q&A Session"));
    }

    #[tokio::test]
    async fn test_export_pdf_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let renderer = CommandPdfRenderer::new("pandoc");
        let err = exporter
            .export_pdf(&renderer, &dir.path().join("missing.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[tokio::test]
    async fn test_export_pdf_renderer_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let md = exporter.export_questions(&sample_questions(), None).unwrap();

        let renderer = CommandPdfRenderer::new("viva-test-no-such-renderer");
        let err = exporter.export_pdf(&renderer, &md).await.unwrap_err();
        assert!(matches!(err, ExportError::RendererUnavailable(_)));
        // The failure must not clobber or produce a partial sibling file.
        assert!(!md.with_extension("pdf").exists());
    }
}

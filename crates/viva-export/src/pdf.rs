//! Markdown-to-PDF conversion seam.
//!
//! PDF rendering is delegated to an external collaborator; the only contract
//! is "same base name, `.pdf` extension, written alongside the source".

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ExportError;

/// External renderer capability consumed by the exporter.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Short name identifying the renderer, for logs and error reports.
    fn name(&self) -> &str;

    /// Convert `markdown` into `output`.
    async fn render(&self, markdown: &Path, output: &Path) -> Result<(), ExportError>;
}

/// Renderer invoking an external converter command (`<cmd> <md> -o <pdf>`),
/// e.g. pandoc.
pub struct CommandPdfRenderer {
    command: String,
}

impl CommandPdfRenderer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    fn name(&self) -> &str {
        &self.command
    }

    async fn render(&self, markdown: &Path, output: &Path) -> Result<(), ExportError> {
        debug!(
            command = %self.command,
            source = %markdown.display(),
            "Invoking PDF renderer"
        );

        let result = tokio::process::Command::new(&self.command)
            .arg(markdown)
            .arg("-o")
            .arg(output)
            .output()
            .await;

        let output_info = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(command = %self.command, "PDF renderer not installed");
                return Err(ExportError::RendererUnavailable(self.command.clone()));
            }
            Err(e) => return Err(ExportError::Io(e)),
        };

        if !output_info.status.success() {
            let stderr = String::from_utf8_lossy(&output_info.stderr);
            return Err(ExportError::Renderer(format!(
                "{} exited with {}: {}",
                self.command,
                output_info.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

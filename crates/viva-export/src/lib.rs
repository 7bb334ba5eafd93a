//! Session export pipeline.
//!
//! Serializes accumulated session records into versioned markdown documents
//! and optionally derives PDFs via an external renderer collaborator. The
//! markdown rendering is a pure function of the records and the session
//! timestamp, so identical inputs produce byte-identical documents.

pub mod error;
pub mod exporter;
pub mod markdown;
pub mod pdf;

pub use error::ExportError;
pub use exporter::SessionExporter;
pub use markdown::render;
pub use pdf::{CommandPdfRenderer, PdfRenderer};

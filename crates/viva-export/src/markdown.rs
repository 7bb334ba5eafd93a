//! Markdown document rendering.
//!
//! One shared renderer dispatches on the record variant; each variant keeps
//! its own labeled fields, and optional fields are omitted entirely when
//! absent. Output is fixed-structure markdown: `#`/`##` headers, bold
//! `**Label:**` fields, and a `---` rule after every record.

use chrono::{DateTime, Local};
use viva_core::{RecordKind, SessionRecord};

/// Document title and session-timestamp label per record kind.
fn document_header(kind: RecordKind) -> (&'static str, &'static str) {
    match kind {
        RecordKind::Question => ("Machine Learning Interview Questions", "Generated on"),
        RecordKind::Qa => ("Q&A Session", "Session date"),
        RecordKind::Practice => ("Practice Session Report", "Session date"),
    }
}

/// Section label per record variant.
fn section_label(record: &SessionRecord) -> &'static str {
    match record.kind() {
        RecordKind::Question => "Question",
        RecordKind::Qa => "Q&A",
        RecordKind::Practice => "Practice Question",
    }
}

/// Render a session document.
///
/// Pure: identical `(kind, records, session_time)` inputs produce
/// byte-identical output.
pub fn render(kind: RecordKind, records: &[SessionRecord], session_time: DateTime<Local>) -> String {
    let (title, time_label) = document_header(kind);

    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", title));
    out.push_str(&format!(
        "{}: {}\n\n",
        time_label,
        session_time.format("%Y-%m-%d %H:%M:%S")
    ));

    for (i, record) in records.iter().enumerate() {
        render_record(&mut out, record, i + 1);
    }

    out
}

fn render_record(out: &mut String, record: &SessionRecord, index: usize) {
    out.push_str(&format!("## {} {}\n\n", section_label(record), index));

    match record {
        SessionRecord::Question(r) => {
            out.push_str(&format!("{}\n\n", r.question));
            if let Some(ref category) = r.category {
                out.push_str(&format!("**Category:** {}\n\n", category));
            }
            out.push_str(&format!("**Generated:** {}\n\n", r.generated_at.to_rfc3339()));
        }
        SessionRecord::Qa(r) => {
            out.push_str(&format!("**Question:** {}\n\n", r.question));
            out.push_str(&format!("**Answer:** {}\n\n", r.answer));
            if let Some(ref review) = r.review {
                out.push_str(&format!("**Review:** {}\n\n", review));
            }
        }
        SessionRecord::Practice(r) => {
            out.push_str(&format!("**Question:** {}\n\n", r.question));
            out.push_str(&format!("**Model Answer:** {}\n\n", r.model_answer));
            if let Some(ref user_answer) = r.user_answer {
                out.push_str(&format!("**Your Answer:** {}\n\n", user_answer));
            }
            if let Some(ref review) = r.review {
                out.push_str(&format!("**Review:** {}\n\n", review));
            }
        }
    }

    out.push_str("---\n\n");
}

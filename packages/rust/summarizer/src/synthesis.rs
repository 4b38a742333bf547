//! Cross-document synthesis: themes, per-document insights, inferred risks,
//! and a hard word budget.

use std::fmt::Write as _;

use docdraft_shared::DocumentRecord;
use tracing::{debug, instrument};

use crate::keywords::extract_keywords;
use crate::sentences::{DEFAULT_MAX_BULLETS, summarize_document};

/// Word budget for the combined summary unless the caller asks otherwise.
pub const DEFAULT_MAX_WORDS: usize = 800;

/// Themes listed in the combined summary.
const THEME_COUNT: usize = 8;

/// Summary lines kept per document in the insights section.
const INSIGHT_SEGMENTS: usize = 3;

/// Appended when the word budget cuts the text.
const ELLIPSIS: &str = "…";

const NEXT_STEPS: [&str; 3] = [
    "Validate requirements with stakeholders to confirm shared understanding.",
    "Prioritize solution components that deliver the highest business impact first.",
    "Align integration and security workstreams with the implementation roadmap.",
];

/// Combined Markdown summary of all `documents`, at most `max_words` words
/// (plus an ellipsis when cut). Empty input yields an empty string.
#[instrument(skip_all, fields(documents = documents.len(), max_words))]
pub fn summarize_documents(documents: &[DocumentRecord], max_words: usize) -> String {
    if documents.is_empty() {
        return String::new();
    }

    let combined = combined_text(documents);
    let themes = extract_keywords(&combined, THEME_COUNT);

    let mut out = String::new();
    out.push_str("## Combined Document Summary\n\n");

    if !themes.is_empty() {
        out.push_str("### Key Themes\n");
        for theme in &themes {
            let _ = writeln!(out, "- {theme}");
        }
        out.push('\n');
    }

    out.push_str("### Document Insights\n");
    for record in documents {
        let summary = if record.has_summary() {
            record.summary.clone()
        } else {
            summarize_document(&record.extracted_content, DEFAULT_MAX_BULLETS)
        };
        let _ = writeln!(
            out,
            "- **{}**: {}",
            record.file_name,
            condense_summary(&summary, INSIGHT_SEGMENTS)
        );
    }
    out.push('\n');

    let risks = risk_statements(&combined, &themes);
    if !risks.is_empty() {
        out.push_str("### Potential Risks and Gaps\n");
        for risk in &risks {
            let _ = writeln!(out, "- {risk}");
        }
        out.push('\n');
    }

    out.push_str("### Recommended Next Steps\n");
    for step in NEXT_STEPS {
        let _ = writeln!(out, "- {step}");
    }

    debug!(themes = themes.len(), risks = risks.len(), "combined summary assembled");

    limit_to_word_count(out.trim(), max_words)
}

/// Contents of all documents joined by newlines.
pub fn combined_text(documents: &[DocumentRecord]) -> String {
    documents
        .iter()
        .map(|d| d.extracted_content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join the first `max_segments` summary lines with `"; "`, bullets stripped.
fn condense_summary(summary: &str, max_segments: usize) -> String {
    summary
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_segments)
        .map(clean_bullet)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strip leading `-` markers and capitalize the first character.
fn clean_bullet(line: &str) -> String {
    let line = line.trim_start_matches('-').trim();
    let mut chars = line.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rule-based risks, in fixed priority order. Blank text has no risks.
fn risk_statements(combined: &str, themes: &[String]) -> Vec<&'static str> {
    let mut risks = Vec::new();
    if combined.trim().is_empty() {
        return risks;
    }

    let has_theme = |name: &str| themes.iter().any(|t| t.eq_ignore_ascii_case(name));

    if has_theme("security") {
        risks.push(
            "Security requirements appear frequently; ensure controls are designed and validated early.",
        );
    }
    if has_theme("integration") || has_theme("api") {
        risks.push("Integration points need interface contracts and failure-handling strategies.");
    }
    if themes.is_empty() {
        risks.push("Clarify the primary business goals to focus the solution scope.");
    }
    if !combined.to_lowercase().contains("testing") {
        risks.push("Testing expectations are unclear; define validation and acceptance criteria.");
    }

    risks
}

/// Cut `text` to its first `max_words` whitespace-delimited words.
///
/// Text within budget is returned unchanged. Cut text is re-joined with
/// single spaces and ends with `…`; the cut may land mid-sentence.
pub fn limit_to_word_count(text: &str, max_words: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }

    debug!(words = words.len(), max_words, "trimming text to word budget");
    format!("{}{ELLIPSIS}", words[..max_words].join(" "))
}

//! Architecture draft assembler.
//!
//! Renders the session's documents into a fixed six-section Markdown
//! document with Mermaid diagram blocks.

use std::fmt::Write as _;

use tracing::{debug, instrument};

use docdraft_shared::DocumentRecord;
use docdraft_summarizer::{DEFAULT_MAX_BULLETS, combined_text, extract_keywords, summarize_document};

/// Themes listed under "Project Scope".
const SCOPE_THEME_COUNT: usize = 6;

/// Returned when there is nothing to draft from.
pub const EMPTY_DRAFT: &str = "# Architecture Draft\n\n_No source documents were provided._";

const SCOPE_FALLBACK: &str = "Document inputs highlight business capabilities, technical components, and delivery considerations.";

const NO_HIGHLIGHTS: &str = "- No specific highlights were found in the document extract.";

const FLOW_DIAGRAM: &str = "\
```mermaid
flowchart LR
    Users[Stakeholder Inputs] --> Intake[Requirement Intake]
    Intake --> Analysis[Architecture Analysis]
    Analysis --> Design[Solution Design]
    Design --> Delivery[Implementation Streams]
    Delivery --> Value[Measured Outcomes]
```
";

const SEQUENCE_DIAGRAM: &str = "\
```mermaid
sequenceDiagram
    participant Stakeholder
    participant ArchitectureTeam as Architecture Team
    participant Systems as Core Systems
    participant Security as Security Services
    Stakeholder->>ArchitectureTeam: Share business drivers and constraints
    ArchitectureTeam->>Systems: Evaluate current capabilities and integration needs
    Systems-->>ArchitectureTeam: Provide interface and performance data
    ArchitectureTeam->>Security: Validate compliance and protection requirements
    Security-->>ArchitectureTeam: Recommend controls and policies
    ArchitectureTeam-->>Stakeholder: Present target architecture and roadmap
```
";

const RECOMMENDATIONS: [&str; 4] = [
    "Align integration patterns with the most critical business capabilities.",
    "Establish observability and error-handling for all cross-system interfaces.",
    "Apply zero-trust principles to user and service access, including strong identity and encryption controls.",
    "Define operational guardrails for data protection, privacy, and regulatory adherence.",
];

/// Render the architecture draft for `documents`, in upload order.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn generate(documents: &[DocumentRecord]) -> String {
    if documents.is_empty() {
        return EMPTY_DRAFT.to_string();
    }

    let themes = extract_keywords(&combined_text(documents), SCOPE_THEME_COUNT);

    let mut out = String::new();
    out.push_str("# Architecture Draft\n\n");

    // 1. Scope
    out.push_str("## 1. Project Scope\n");
    if themes.is_empty() {
        let _ = writeln!(out, "{SCOPE_FALLBACK}");
    } else {
        out.push_str("The solution targets the following primary themes:\n");
        for theme in &themes {
            let _ = writeln!(out, "- {}", capitalize(theme));
        }
    }
    out.push('\n');

    // 2. Overview diagram, one node per document
    out.push_str("## 2. Solution Overview Diagram\n");
    out.push_str("```mermaid\ngraph TD\n");
    out.push_str("    A[Business Goals] --> B[Target Solution]\n");
    for (i, record) in documents.iter().enumerate() {
        let _ = writeln!(
            out,
            "    D{}[{} Insights] --> B",
            i + 1,
            mermaid_label(&record.file_name)
        );
    }
    out.push_str("    B --> C[Value Outcomes]\n```\n\n");

    // 3. Components
    out.push_str("## 3. Component Descriptions\n");
    for record in documents {
        let _ = writeln!(out, "### {}", record.file_name);
        let summary = if record.has_summary() {
            record.summary.clone()
        } else {
            summarize_document(&record.extracted_content, DEFAULT_MAX_BULLETS)
        };
        if summary.trim().is_empty() {
            let _ = writeln!(out, "{NO_HIGHLIGHTS}");
        } else {
            let _ = writeln!(out, "{summary}");
        }
        out.push('\n');
    }

    // 4–5. Fixed diagrams
    out.push_str("## 4. Solution Flow Diagram\n");
    out.push_str(FLOW_DIAGRAM);
    out.push('\n');

    out.push_str("## 5. Solution Sequence Diagram\n");
    out.push_str(SEQUENCE_DIAGRAM);
    out.push('\n');

    // 6. Recommendations
    out.push_str("## 6. Integration and Security Recommendations\n");
    for recommendation in RECOMMENDATIONS {
        let _ = writeln!(out, "- {recommendation}");
    }

    debug!(themes = themes.len(), chars = out.len(), "architecture draft rendered");

    out.trim().to_string()
}

/// Node label safe inside Mermaid `[...]`: brackets become parentheses and a
/// blank name becomes `Document`.
fn mermaid_label(file_name: &str) -> String {
    if file_name.trim().is_empty() {
        return "Document".to_string();
    }
    file_name.replace('[', "(").replace(']', ")")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

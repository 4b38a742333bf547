//! Core domain types for DocDraft conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name used when an upload arrives without one.
pub const DEFAULT_FILE_NAME: &str = "document";

// ---------------------------------------------------------------------------
// DocumentRecord
// ---------------------------------------------------------------------------

/// One processed upload within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Original file name (never empty).
    pub file_name: String,
    /// Raw text extracted from the upload. May be empty.
    pub extracted_content: String,
    /// Bullet summary; empty until computed.
    #[serde(default)]
    pub summary: String,
    /// When the upload was accepted.
    pub received_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Create a record with no summary yet.
    ///
    /// A missing or blank file name falls back to [`DEFAULT_FILE_NAME`].
    pub fn new(file_name: Option<&str>, extracted_content: impl Into<String>) -> Self {
        let file_name = match file_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_FILE_NAME.to_string(),
        };

        Self {
            file_name,
            extracted_content: extracted_content.into(),
            summary: String::new(),
            received_at: Utc::now(),
        }
    }

    /// Attach a summary, replacing any previous one.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Whether a non-blank summary has been computed.
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Where a conversation is in the upload → decide → generate flow.
///
/// Variants are ordered; see [`SessionState::advance_to`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    AwaitingDocuments,
    ReadyForDecision,
    ArchitectureGenerated,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingDocuments => write!(f, "awaiting_documents"),
            Self::ReadyForDecision => write!(f, "ready_for_decision"),
            Self::ArchitectureGenerated => write!(f, "architecture_generated"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Accumulated documents and status for one conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    documents: Vec<DocumentRecord>,
    status: SessionStatus,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents in upload order.
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Append a document. The status is left untouched.
    pub fn add_document(&mut self, record: DocumentRecord) {
        self.documents.push(record);
    }

    /// Move the status forward. Requests to move backwards are ignored.
    ///
    /// Returns `true` if the status changed.
    pub fn advance_to(&mut self, next: SessionStatus) -> bool {
        if next > self.status {
            tracing::debug!(from = %self.status, to = %next, "session status advanced");
            self.status = next;
            true
        } else {
            false
        }
    }

    /// The user wants to upload more documents: back to `AwaitingDocuments`
    /// from any state.
    pub fn request_more_uploads(&mut self) {
        self.status = SessionStatus::AwaitingDocuments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_defaults_blank_file_name() {
        assert_eq!(DocumentRecord::new(None, "x").file_name, DEFAULT_FILE_NAME);
        assert_eq!(DocumentRecord::new(Some("  "), "x").file_name, DEFAULT_FILE_NAME);
        assert_eq!(DocumentRecord::new(Some("a.pdf"), "x").file_name, "a.pdf");
    }

    #[test]
    fn fresh_session_awaits_documents() {
        let state = SessionState::new();
        assert_eq!(state.status(), SessionStatus::AwaitingDocuments);
        assert!(!state.has_documents());
    }

    #[test]
    fn status_only_moves_forward() {
        let mut state = SessionState::new();
        assert!(state.advance_to(SessionStatus::ArchitectureGenerated));
        assert!(!state.advance_to(SessionStatus::ReadyForDecision));
        assert_eq!(state.status(), SessionStatus::ArchitectureGenerated);
    }

    #[test]
    fn upload_more_regresses_from_any_state() {
        let mut state = SessionState::new();
        state.advance_to(SessionStatus::ReadyForDecision);
        state.request_more_uploads();
        assert_eq!(state.status(), SessionStatus::AwaitingDocuments);

        state.advance_to(SessionStatus::ArchitectureGenerated);
        state.request_more_uploads();
        assert_eq!(state.status(), SessionStatus::AwaitingDocuments);
    }

    #[test]
    fn adding_documents_keeps_status() {
        let mut state = SessionState::new();
        state.advance_to(SessionStatus::ReadyForDecision);
        state.add_document(DocumentRecord::new(Some("b.docx"), "text"));
        assert_eq!(state.status(), SessionStatus::ReadyForDecision);
        assert_eq!(state.documents().len(), 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&SessionStatus::ReadyForDecision).expect("serialize");
        assert_eq!(json, r#""ready_for_decision""#);
    }
}

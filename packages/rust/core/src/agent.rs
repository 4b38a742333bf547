//! Conversation turn handler.
//!
//! A [`DocumentAgent`] receives either uploads or free text for a
//! conversation id and answers with the messages to send back. Channel
//! transport and file download live outside this crate: uploads arrive as
//! bytes already in memory.
//!
//! The session lock is held for the whole turn, so two turns for the same
//! conversation never interleave. Content-service failures are handled here,
//! once, and turned into user-facing messages.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use docdraft_extract::is_supported_upload;
use docdraft_shared::{DEFAULT_FILE_NAME, DocumentRecord, SessionStatus};

use crate::service::ContentService;
use crate::session::SessionStore;

pub const WELCOME_MESSAGE: &str = "Hello! Upload one or more solution documents (PDF, Word, JPG) and I will summarize them. Once you are ready, ask me to generate the draft architecture document.";

const DECISION_PROMPT: &str =
    "Would you like to upload more documents or should I generate the draft architecture document?";

const NO_TEXT: &str = "I did not receive any text. Upload a document or tell me what to do next.";
const NO_UPLOADS: &str = "I could not find any attachments in your message.";
const NOTHING_PROCESSED: &str = "I was not able to process any of the attachments.";
const NEED_DOCUMENTS: &str =
    "I need at least one processed document before drafting the architecture.";
const DRAFT_FAILED: &str =
    "I could not generate the architecture document because the content service request failed.";
const UPLOAD_NEXT: &str = "Please upload the next document whenever you are ready.";
const HELP: &str = "Upload a document for analysis or ask me to generate the architecture draft when you are ready.";

// ---------------------------------------------------------------------------
// Turn inputs and outputs
// ---------------------------------------------------------------------------

/// One uploaded file.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Name used in messages when the upload has one.
    fn display_name(&self) -> Option<&str> {
        self.file_name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Messages to send back, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReply {
    pub messages: Vec<String>,
}

impl TurnReply {
    fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }
}

/// What a free-text message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Generate,
    UploadMore,
    Empty,
    Other,
}

impl Intent {
    /// Case-insensitive keyword match. `generate` alone, or any text naming
    /// both `generate` and `architecture`, wins over upload requests.
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            Self::Empty
        } else if text == "generate" || (text.contains("generate") && text.contains("architecture"))
        {
            Self::Generate
        } else if text.contains("upload") || text.contains("more") {
            Self::UploadMore
        } else {
            Self::Other
        }
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// Document-to-architecture conversation driver.
#[derive(Clone)]
pub struct DocumentAgent {
    service: Arc<dyn ContentService>,
    sessions: Arc<SessionStore>,
}

impl DocumentAgent {
    pub fn new(service: Arc<dyn ContentService>, sessions: Arc<SessionStore>) -> Self {
        Self { service, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn welcome_message(&self) -> &'static str {
        WELCOME_MESSAGE
    }

    /// Forget everything about `conversation_id`.
    pub fn reset(&self, conversation_id: &str) {
        self.sessions.reset(conversation_id);
    }

    /// Process a batch of uploads for one conversation.
    #[instrument(skip_all, fields(conversation_id = %conversation_id, uploads = uploads.len(), service = self.service.name()))]
    pub async fn handle_uploads(&self, conversation_id: &str, uploads: Vec<Upload>) -> TurnReply {
        if uploads.is_empty() {
            return TurnReply::single(NO_UPLOADS);
        }

        let handle = self.sessions.get_or_create(conversation_id);
        let mut session = handle.lock().await;
        let mut reply = TurnReply::default();
        let mut processed: Vec<String> = Vec::new();

        for upload in uploads {
            let name = upload.display_name();

            if !is_supported_upload(upload.content_type.as_deref(), name) {
                reply.push(format!(
                    "{} is not a supported file type.",
                    name.unwrap_or("This attachment")
                ));
                continue;
            }

            if upload.bytes.is_empty() {
                reply.push(format!(
                    "I could not read {}.",
                    name.unwrap_or("the attachment")
                ));
                continue;
            }

            let file_name = name.unwrap_or(DEFAULT_FILE_NAME);

            let content = match self
                .service
                .extract_content(file_name, upload.content_type.as_deref(), &upload.bytes)
                .await
            {
                Ok(content) => content,
                Err(e) => {
                    error!(file_name, error = %e, "content extraction failed");
                    reply.push(format!(
                        "I could not process {} due to a content service error.",
                        name.unwrap_or("the attachment")
                    ));
                    continue;
                }
            };

            let summary = match self.service.summarize_document(file_name, &content).await {
                Ok(summary) => summary,
                Err(e) => {
                    error!(file_name, error = %e, "document summary failed");
                    reply.push(format!(
                        "I extracted content from {} but could not summarize it.",
                        name.unwrap_or("the attachment")
                    ));
                    String::new()
                }
            };

            let record = DocumentRecord::new(name, content).with_summary(summary);
            processed.push(record.file_name.clone());
            session.add_document(record);
        }

        if processed.is_empty() {
            reply.push(NOTHING_PROCESSED);
            return reply;
        }

        let combined = match self.service.summarize_documents(session.documents()).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "combined summary failed; listing processed files");
                fallback_summary(&processed)
            }
        };

        session.advance_to(SessionStatus::ReadyForDecision);
        info!(
            processed = processed.len(),
            total = session.documents().len(),
            status = %session.status(),
            "uploads processed"
        );

        reply.push(format!("{}\n\n{DECISION_PROMPT}", combined.trim_end()));
        reply
    }

    /// Interpret a free-text message for one conversation.
    #[instrument(skip_all, fields(conversation_id = %conversation_id, service = self.service.name()))]
    pub async fn handle_text(&self, conversation_id: &str, text: &str) -> TurnReply {
        let intent = Intent::parse(text);
        if intent == Intent::Empty {
            return TurnReply::single(NO_TEXT);
        }

        let handle = self.sessions.get_or_create(conversation_id);
        let mut session = handle.lock().await;

        match intent {
            Intent::Generate => {
                if !session.has_documents() {
                    return TurnReply::single(NEED_DOCUMENTS);
                }
                match self
                    .service
                    .generate_architecture_document(session.documents())
                    .await
                {
                    Ok(draft) => {
                        session.advance_to(SessionStatus::ArchitectureGenerated);
                        info!(chars = draft.len(), "architecture draft generated");
                        TurnReply::single(draft)
                    }
                    Err(e) => {
                        error!(error = %e, "architecture draft failed");
                        TurnReply::single(DRAFT_FAILED)
                    }
                }
            }
            Intent::UploadMore => {
                session.request_more_uploads();
                TurnReply::single(UPLOAD_NEXT)
            }
            Intent::Empty | Intent::Other => TurnReply::single(HELP),
        }
    }
}

/// Shown when the combined summary cannot be produced.
fn fallback_summary(file_names: &[String]) -> String {
    let mut out = String::from("Here is what I extracted:\n");
    for name in file_names {
        out.push_str("• ");
        out.push_str(name);
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! In-process content service built on the extract and summarizer crates.

use async_trait::async_trait;
use tracing::{debug, instrument};

use docdraft_shared::{DocumentRecord, Result, SummaryConfig};

use super::ContentService;
use crate::architecture;

/// Deterministic heuristics; no network, no model.
#[derive(Debug, Clone, Default)]
pub struct LocalContentService {
    limits: SummaryConfig,
}

impl LocalContentService {
    pub fn new(limits: SummaryConfig) -> Self {
        Self { limits }
    }
}

#[async_trait]
impl ContentService for LocalContentService {
    fn name(&self) -> &str {
        "local"
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn extract_content(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String> {
        docdraft_extract::extract_upload(file_name, content_type, bytes)
    }

    /// Empty summaries become a one-line "nothing found" bullet so the user
    /// always gets feedback for an upload.
    #[instrument(skip(self, content), fields(chars = content.len()))]
    async fn summarize_document(&self, file_name: &str, content: &str) -> Result<String> {
        let summary = docdraft_summarizer::summarize_document(content, self.limits.max_bullets);
        if summary.trim().is_empty() {
            debug!("no sentences to summarize");
            return Ok(format!(
                "- No significant insights were detected in {file_name}."
            ));
        }
        Ok(summary)
    }

    async fn summarize_documents(&self, documents: &[DocumentRecord]) -> Result<String> {
        Ok(docdraft_summarizer::summarize_documents(
            documents,
            self.limits.max_words,
        ))
    }

    async fn generate_architecture_document(&self, documents: &[DocumentRecord]) -> Result<String> {
        Ok(architecture::generate(documents))
    }
}

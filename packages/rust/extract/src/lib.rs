//! Plain-text extraction for uploaded documents.
//!
//! The rest of DocDraft only sees one capability:
//! [`extract_plain_text`]`(file_name, bytes) -> Result<String>`.
//! Each [`DocumentFormat`] maps to one decoding strategy; a failure is a
//! [`DocDraftError::Extraction`] and is never retried here.

mod docx;
mod format;
mod pdf;

use docdraft_shared::{DocDraftError, Result};
use tracing::{debug, instrument};

pub use format::{DocumentFormat, is_supported_upload};

/// Extract text from `bytes`, choosing the strategy from `file_name`'s extension.
pub fn extract_plain_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    extract_as(DocumentFormat::from_file_name(file_name), file_name, bytes)
}

/// Extract text from an upload, choosing the strategy from its content type
/// and falling back to the extension when the type is missing or generic.
pub fn extract_upload(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Result<String> {
    let format = DocumentFormat::from_content_type_and_name(content_type, file_name);
    extract_as(format, file_name, bytes)
}

/// Extract text from `bytes` using an explicit format.
///
/// Empty input yields an empty string for every format.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub fn extract_as(format: DocumentFormat, file_name: &str, bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let text = match format {
        DocumentFormat::Pdf => pdf::extract(bytes),
        DocumentFormat::Docx => docx::extract(bytes),
        DocumentFormat::Doc => {
            Err("legacy binary Word documents are not supported; save as .docx or .pdf".into())
        }
        DocumentFormat::Image => {
            debug!("image upload has no text layer; OCR is not performed");
            Ok(String::new())
        }
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
    .map_err(|message| DocDraftError::extraction(file_name, message))?;

    debug!(chars = text.len(), "content extracted");
    Ok(text)
}

//! PDF text extraction via `lopdf`.

use lopdf::Document;

/// Extract text page by page, one trailing newline per page.
pub(crate) fn extract(bytes: &[u8]) -> Result<String, String> {
    let document = Document::load_mem(bytes).map_err(|e| format!("invalid PDF: {e}"))?;

    if document.is_encrypted() {
        return Err("PDF is encrypted".into());
    }

    let mut out = String::new();
    for page_number in document.get_pages().keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|e| format!("page {page_number}: {e}"))?;
        out.push_str(text.trim_end());
        out.push('\n');
    }

    tracing::debug!(pages = document.get_pages().len(), chars = out.len(), "PDF text extracted");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage() {
        let err = extract(b"%PDF-1.7 but nothing else").unwrap_err();
        assert!(err.starts_with("invalid PDF"));
    }
}

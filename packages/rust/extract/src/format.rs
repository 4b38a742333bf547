//! Upload format detection from file extension and content type.

/// MIME types accepted for upload.
const SUPPORTED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/jpg",
    "image/png",
    // Chat channels deliver file references under this type; the file name
    // then decides the format.
    "application/vnd.microsoft.teams.file.download.info",
];

/// File extensions accepted for upload.
const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// How an upload's bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format, text per page.
    Pdf,
    /// Office Open XML word-processing package.
    Docx,
    /// Legacy binary Word document.
    Doc,
    /// Raster image. No OCR is performed.
    Image,
    /// Anything else, decoded as UTF-8.
    PlainText,
}

impl DocumentFormat {
    /// Infer the format from a file name's extension.
    pub fn from_file_name(file_name: &str) -> Self {
        match extension(file_name).as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            Some("doc") => Self::Doc,
            Some("jpg" | "jpeg" | "png") => Self::Image,
            _ => Self::PlainText,
        }
    }

    /// Infer the format from a content type, refined by the file extension
    /// when the content type is missing or generic.
    pub fn from_content_type_and_name(content_type: Option<&str>, file_name: &str) -> Self {
        let by_type = content_type.map(|ct| ct.trim().to_lowercase());

        match by_type.as_deref() {
            Some("application/pdf") => Self::Pdf,
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                Self::Docx
            }
            Some("application/msword") => Self::Doc,
            Some(ct) if ct.starts_with("image/") => Self::Image,
            _ => Self::from_file_name(file_name),
        }
    }

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Image => "image",
            Self::PlainText => "plain_text",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an upload should be accepted at all, by content type or extension.
pub fn is_supported_upload(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    if let Some(ct) = content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
        if SUPPORTED_CONTENT_TYPES
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(ct))
        {
            return true;
        }
    }

    file_name
        .and_then(extension)
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Lowercased extension without the dot.
fn extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name.trim())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_file_name("Plan.PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("a.docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_file_name("a.doc"), DocumentFormat::Doc);
        assert_eq!(DocumentFormat::from_file_name("scan.jpeg"), DocumentFormat::Image);
        assert_eq!(DocumentFormat::from_file_name("notes.md"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_file_name("README"), DocumentFormat::PlainText);
    }

    #[test]
    fn content_type_wins_over_extension() {
        assert_eq!(
            DocumentFormat::from_content_type_and_name(Some("application/pdf"), "upload.bin"),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_content_type_and_name(Some("image/png"), "photo"),
            DocumentFormat::Image
        );
    }

    #[test]
    fn generic_content_type_falls_back_to_extension() {
        assert_eq!(
            DocumentFormat::from_content_type_and_name(
                Some("application/vnd.microsoft.teams.file.download.info"),
                "design.docx"
            ),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_content_type_and_name(None, "design.pdf"),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn supported_uploads() {
        assert!(is_supported_upload(Some("application/pdf"), None));
        assert!(is_supported_upload(Some("IMAGE/PNG"), Some("x")));
        assert!(is_supported_upload(None, Some("brief.DOCX")));
        assert!(is_supported_upload(Some("application/octet-stream"), Some("a.jpg")));
        assert!(!is_supported_upload(Some("text/plain"), Some("notes.txt")));
        assert!(!is_supported_upload(None, None));
    }
}

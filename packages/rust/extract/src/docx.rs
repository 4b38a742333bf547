//! DOCX text extraction: unzip `word/document.xml` and walk its runs.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

/// Main document part inside the OOXML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a DOCX package, one paragraph per line.
///
/// Body paragraphs and table-cell paragraphs come out in document order.
/// Blank paragraphs are skipped and each line is trimmed.
pub(crate) fn extract(bytes: &[u8]) -> Result<String, String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a DOCX package: {e}"))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {DOCUMENT_PART}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("failed to read {DOCUMENT_PART}: {e}"))?;

    document_text(&xml)
}

/// Walk WordprocessingML and collect `w:t` text per `w:p`.
///
/// Paragraphs nest (text boxes carry their own `w:p` inside a run), so open
/// paragraphs are kept on a stack and an inner one is emitted when it closes.
fn document_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);

    let mut out = String::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    match e.local_name().as_ref() {
                        b"tab" => paragraph.push('\t'),
                        b"br" | b"cr" => paragraph.push('\n'),
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(t)) if in_text => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    paragraph.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::GeneralRef(r)) if in_text => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    push_entity(paragraph, &String::from_utf8_lossy(&r));
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(paragraph) = paragraphs.pop() {
                        let line = paragraph.trim();
                        if !line.is_empty() {
                            out.push_str(line);
                            out.push('\n');
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed document XML at byte {}: {e}",
                    reader.buffer_position()
                ));
            }
            _ => {}
        }
    }

    Ok(out)
}

/// Resolve an entity reference (`amp`, `#38`, `#x26`) into `buf`.
fn push_entity(buf: &mut String, name: &str) {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(|code| {
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse().ok(),
            };
            value.and_then(char::from_u32)
        }),
    };

    match resolved {
        Some(c) => buf.push(c),
        None => {
            buf.push('&');
            buf.push_str(name);
            buf.push(';');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Scope &amp; goals</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Billing </w:t></w:r><w:r><w:t>platform</w:t></w:r></w:p>
    <w:p></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r><w:r><w:tab/><w:t>value</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
  </w:body>
</w:document>"#;

    #[test]
    fn collects_paragraphs_in_order() {
        let text = document_text(BODY).expect("parse");
        assert_eq!(text, "Scope & goals\nBilling platform\nCell\tvalue\n");
    }

    #[test]
    fn text_box_paragraph_keeps_outer_text() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t xml:space="preserve">Before box </w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>Inside box</w:t></w:r></w:p></w:txbxContent></w:pict></w:r><w:r><w:t>after box</w:t></w:r></w:p>
</w:body></w:document>"#;
        let text = document_text(xml).expect("parse");
        assert_eq!(text, "Inside box\nBefore box after box\n");
    }

    #[test]
    fn resolves_numeric_entities() {
        let mut buf = String::new();
        push_entity(&mut buf, "#x41");
        push_entity(&mut buf, "#66");
        push_entity(&mut buf, "nbsp");
        assert_eq!(buf, "AB&nbsp;");
    }

    #[test]
    fn rejects_non_zip_bytes() {
        let err = extract(b"definitely not a zip").unwrap_err();
        assert!(err.contains("not a DOCX package"));
    }

    #[test]
    fn reads_document_part_from_package() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .expect("start file");
        writer.write_all(BODY.as_bytes()).expect("write body");
        let bytes = writer.finish().expect("finish zip").into_inner();

        let text = extract(&bytes).expect("extract");
        assert!(text.starts_with("Scope & goals\n"));
    }

    #[test]
    fn package_without_document_part_fails() {
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .expect("start file");
        let bytes = writer.finish().expect("finish zip").into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(err.contains("missing word/document.xml"));
    }
}

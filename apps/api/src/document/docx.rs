use docx_rs::{DocumentChild, HyperlinkData, ParagraphChild, RunChild};

use crate::document::DocumentError;

/// Paragraph text (one line per paragraph) and external hyperlink targets.
pub fn extract(bytes: &[u8]) -> Result<(String, Vec<String>), DocumentError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut text = String::new();
    let mut links = Vec::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            collect_paragraph(paragraph.children, &mut text, &mut links);
            text.push('\n');
        }
    }
    Ok((text, links))
}

fn collect_paragraph(children: Vec<ParagraphChild>, text: &mut String, links: &mut Vec<String>) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in run.children {
                    if let RunChild::Text(t) = run_child {
                        text.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(hyperlink) => {
                if let HyperlinkData::External { path, .. } = &hyperlink.link {
                    if !path.is_empty() {
                        links.push(path.clone());
                    }
                }
                collect_paragraph(hyperlink.children, text, links);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::test_support::docx_bytes;

    #[test]
    fn test_extracts_paragraph_text() {
        let bytes = docx_bytes(&["Asha Rao", "Python developer https://github.com/asha"]);
        let (text, _) = extract(&bytes).unwrap();
        assert!(text.contains("Asha Rao\n"));
        assert!(text.contains("Python developer"));
    }

    #[test]
    fn test_load_document_finds_text_urls() {
        let bytes = docx_bytes(&["Asha Rao", "GitHub: https://github.com/asha"]);
        let document = crate::document::load_document("asha.DOCX", &bytes).unwrap();
        assert!(document.raw_text.contains("Asha Rao"));
        assert_eq!(document.hyperlinks, vec!["https://github.com/asha"]);
    }
}

use lopdf::{Document, Object};
use tracing::{debug, warn};

use crate::document::DocumentError;

/// Text via `pdf-extract`, falling back to `lopdf` page extraction when that fails.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => Ok(text),
        Err(primary) => {
            warn!("pdf-extract failed ({primary}), retrying with lopdf");
            extract_text_lopdf(bytes)
                .map_err(|fallback| DocumentError::Pdf(format!("{primary}; {fallback}")))
        }
    }
}

fn extract_text_lopdf(bytes: &[u8]) -> Result<String, lopdf::Error> {
    let doc = Document::load_mem(bytes)?;
    let mut text = String::new();
    for page_number in doc.get_pages().into_keys() {
        match doc.extract_text(&[page_number]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => debug!("Skipping unreadable PDF page {page_number}: {e}"),
        }
    }
    Ok(text)
}

/// URIs of link annotations (`/Annots` → `/A` → `/URI`) on every page.
/// A PDF whose annotations cannot be read simply yields no links.
pub fn extract_links(bytes: &[u8]) -> Vec<String> {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            debug!("Skipping PDF link extraction: {e}");
            return vec![];
        }
    };

    let mut links = Vec::new();
    for page_id in doc.get_pages().into_values() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Some(Object::Array(annotations)) =
            page.get(b"Annots").ok().and_then(|o| resolve(&doc, o))
        else {
            continue;
        };
        for annotation in annotations {
            if let Some(uri) = annotation_uri(&doc, annotation) {
                links.push(uri);
            }
        }
    }
    links
}

fn annotation_uri(doc: &Document, annotation: &Object) -> Option<String> {
    let Object::Dictionary(annotation) = resolve(doc, annotation)? else {
        return None;
    };
    let Object::Dictionary(action) = resolve(doc, annotation.get(b"A").ok()?)? else {
        return None;
    };
    match resolve(doc, action.get(b"URI").ok()?)? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_pdf_reports_both_readers() {
        let err = extract_text(b"%PDF-garbage").unwrap_err();
        let DocumentError::Pdf(message) = err else {
            panic!("expected a PDF error");
        };
        assert!(message.contains(';'), "{message}");
    }

    #[test]
    fn test_lopdf_fallback_rejects_non_pdf() {
        assert!(extract_text_lopdf(b"not a pdf").is_err());
    }

    #[test]
    fn test_links_from_non_pdf_are_empty() {
        assert!(extract_links(b"not a pdf").is_empty());
    }
}

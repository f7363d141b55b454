//! Page lookup and media box resolution

use crate::error::StampError;
use crate::geometry::PageBox;
use lopdf::{Document, Object, ObjectId};
use tracing::warn;

/// Guards against `/Parent` cycles in malformed page trees
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Object id of the first page in document order
pub fn first_page_id(doc: &Document) -> Result<ObjectId, StampError> {
    doc.get_pages()
        .values()
        .next()
        .copied()
        .ok_or(StampError::EmptyDocument)
}

/// Resolve the media box of a page.
///
/// `/MediaBox` is an inheritable attribute, so when the page itself does not
/// carry one the `/Parent` chain is walked. A page tree with no media box
/// anywhere falls back to US Letter.
pub fn resolve_media_box(doc: &Document, page_id: ObjectId) -> Result<PageBox, StampError> {
    let mut current = page_id;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        let dict = doc.get_dictionary(current).map_err(|e| {
            StampError::ParseError(format!("Page node {:?} is not a dictionary: {}", current, e))
        })?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            return parse_page_box(doc, media_box);
        }

        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => break,
        }
    }

    warn!(
        "No MediaBox found for page {:?}, assuming US Letter",
        page_id
    );
    Ok(PageBox::letter())
}

fn parse_page_box(doc: &Document, obj: &Object) -> Result<PageBox, StampError> {
    let values = resolve(doc, obj)?
        .as_array()
        .map_err(|_| StampError::ParseError("MediaBox is not an array".into()))?;

    if values.len() != 4 {
        return Err(StampError::ParseError(format!(
            "MediaBox has {} entries, expected 4",
            values.len()
        )));
    }

    let mut corners = [0.0; 4];
    for (slot, value) in corners.iter_mut().zip(values) {
        *slot = as_number(resolve(doc, value)?).ok_or_else(|| {
            StampError::ParseError(format!("MediaBox entry is not a number: {:?}", value))
        })?;
    }

    Ok(PageBox::from_corners(
        corners[0], corners[1], corners[2], corners[3],
    ))
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, StampError> {
    match obj {
        Object::Reference(id) => doc
            .get_object(*id)
            .map_err(|e| StampError::ParseError(format!("Dangling reference {:?}: {}", id, e))),
        other => Ok(other),
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(v) => Some(*v as f64),
        Object::Real(v) => Some(*v as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_pdf, TestPage};
    use lopdf::{dictionary, Document, Object};
    use pretty_assertions::assert_eq;

    fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    #[test]
    fn test_first_page_of_empty_document_is_an_error() {
        let doc = load(&build_pdf(&[]));
        let result = first_page_id(&doc);
        assert!(matches!(result, Err(StampError::EmptyDocument)));
    }

    #[test]
    fn test_inline_media_box() {
        let doc = load(&build_pdf(&[TestPage::sized(300, 400)]));
        let page_id = first_page_id(&doc).unwrap();
        let page = resolve_media_box(&doc, page_id).unwrap();
        assert_eq!(page, PageBox::from_corners(0.0, 0.0, 300.0, 400.0));
    }

    #[test]
    fn test_media_box_inherited_from_pages_node() {
        let doc = load(&build_pdf(&[TestPage::inherited()]));
        let page_id = first_page_id(&doc).unwrap();
        let page = resolve_media_box(&doc, page_id).unwrap();
        // build_pdf puts an A4 box on the Pages node
        assert_eq!(page.width(), 595.0);
        assert_eq!(page.height(), 842.0);
    }

    #[test]
    fn test_indirect_media_box() {
        let mut doc = Document::with_version("1.5");
        let box_id = doc.add_object(Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(200.5),
            Object::Integer(100),
        ]));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => Object::Reference(box_id),
        });

        let page = resolve_media_box(&doc, page_id).unwrap();
        assert_eq!(page.width(), 200.5);
        assert_eq!(page.height(), 100.0);
    }

    #[test]
    fn test_missing_media_box_defaults_to_letter() {
        let mut doc = Document::with_version("1.5");
        let page_id = doc.add_object(dictionary! { "Type" => "Page" });

        let page = resolve_media_box(&doc, page_id).unwrap();
        assert_eq!(page, PageBox::letter());
    }

    #[test]
    fn test_malformed_media_box_is_a_parse_error() {
        let mut doc = Document::with_version("1.5");
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into()],
        });

        let result = resolve_media_box(&doc, page_id);
        assert!(matches!(result, Err(StampError::ParseError(_))));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let mut doc = Document::with_version("1.5");
        let a = doc.new_object_id();
        let b = doc.new_object_id();
        doc.objects.insert(
            a,
            Object::Dictionary(dictionary! { "Type" => "Page", "Parent" => Object::Reference(b) }),
        );
        doc.objects.insert(
            b,
            Object::Dictionary(dictionary! { "Type" => "Pages", "Parent" => Object::Reference(a) }),
        );

        let page = resolve_media_box(&doc, a).unwrap();
        assert_eq!(page, PageBox::letter());
    }
}

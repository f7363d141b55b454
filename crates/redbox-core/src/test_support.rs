//! In-memory PDF fixtures for unit tests

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Shape of one page in a generated fixture
pub struct TestPage {
    /// `None` leaves the page to inherit the A4 box set on the Pages node
    pub media_box: Option<(i64, i64)>,
}

impl TestPage {
    pub fn letter() -> Self {
        Self::sized(612, 792)
    }

    pub fn sized(width: i64, height: i64) -> Self {
        Self {
            media_box: Some((width, height)),
        }
    }

    pub fn inherited() -> Self {
        Self { media_box: None }
    }
}

/// Build a PDF with one page per entry, each carrying the text `Page-N`
pub fn build_pdf(pages: &[TestPage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let catalog_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 50 700 Td (Page-{}) Tj ET", index + 1);
        let content_id = doc.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            content.into_bytes(),
        )));

        let page_id = add_page(&mut doc, pages_id, content_id, page.media_box);
        kids.push(Object::Reference(page_id));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(kids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ]),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    finish(doc, catalog_id, pages_id)
}

/// Build a two-page PDF whose pages point at the same content stream
pub fn build_pdf_with_shared_content() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let catalog_id = doc.new_object_id();
    let content_id = doc.add_object(Object::Stream(Stream::new(
        Dictionary::new(),
        b"BT /F1 12 Tf 50 700 Td (Shared) Tj ET".to_vec(),
    )));

    let first = add_page(&mut doc, pages_id, content_id, Some((612, 792)));
    let second = add_page(&mut doc, pages_id, content_id, Some((612, 792)));

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(2));
    pages_dict.set(
        "Kids",
        Object::Array(vec![Object::Reference(first), Object::Reference(second)]),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    finish(doc, catalog_id, pages_id)
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    content_id: ObjectId,
    media_box: Option<(i64, i64)>,
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_id));
    page_dict.set("Contents", Object::Reference(content_id));
    if let Some((width, height)) = media_box {
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ]),
        );
    }
    doc.add_object(Object::Dictionary(page_dict))
}

fn finish(mut doc: Document, catalog_id: ObjectId, pages_id: ObjectId) -> Vec<u8> {
    let mut catalog_dict = Dictionary::new();
    catalog_dict.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog_dict.set("Pages", Object::Reference(pages_id));
    doc.objects
        .insert(catalog_id, Object::Dictionary(catalog_dict));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

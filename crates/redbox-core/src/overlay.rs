//! The transient drawing laid over the first page, and how it is merged in.

use crate::error::StampError;
use crate::geometry::{CallerRect, PageBox, PdfRect};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Stroke colour (RGB, 0-1 range) and line width of the box outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub rgb: (f64, f64, f64),
    pub line_width: f64,
}

impl StrokeStyle {
    /// Pure red, 4pt wide
    pub const fn red_box() -> Self {
        Self {
            rgb: (1.0, 0.0, 0.0),
            line_width: 4.0,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::red_box()
    }
}

/// A single-page drawing the size of the target page holding one stroked
/// rectangle.
#[derive(Debug, Clone)]
pub struct Overlay {
    page_box: PageBox,
    rect: PdfRect,
    style: StrokeStyle,
}

impl Overlay {
    /// Place the caller's rectangle on a canvas matching `page_box`
    pub fn new(page_box: PageBox, rect: CallerRect) -> Self {
        Self {
            page_box,
            rect: rect.to_pdf_space(page_box.height()),
            style: StrokeStyle::red_box(),
        }
    }

    pub fn page_box(&self) -> PageBox {
        self.page_box
    }

    /// The rectangle in PDF page space
    pub fn rect(&self) -> PdfRect {
        self.rect
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Content operators for the overlay, wrapped in its own graphics state
    pub fn to_content(&self) -> Content {
        let (r, g, b) = self.style.rgb;
        let rect = self.rect;

        Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "RG",
                    vec![
                        Object::Real(r as f32),
                        Object::Real(g as f32),
                        Object::Real(b as f32),
                    ],
                ),
                Operation::new("w", vec![Object::Real(self.style.line_width as f32)]),
                Operation::new(
                    "re",
                    vec![
                        Object::Real(rect.x as f32),
                        Object::Real(rect.y as f32),
                        Object::Real(rect.width as f32),
                        Object::Real(rect.height as f32),
                    ],
                ),
                // Stroke only, the page underneath stays visible
                Operation::new("S", vec![]),
                Operation::new("Q", vec![]),
            ],
        }
    }

    /// Encode the overlay operators.
    ///
    /// Fails when the rectangle cannot be written as PDF real numbers.
    pub fn encode(&self) -> Result<Vec<u8>, StampError> {
        if !self.rect.is_representable() {
            return Err(StampError::CoordinateOutOfRange(format!(
                "box at x={}, y={}, width={}, height={} does not fit in PDF page space",
                self.rect.x, self.rect.y, self.rect.width, self.rect.height
            )));
        }

        self.to_content()
            .encode()
            .map_err(|e| StampError::OperationError(format!("Failed to encode overlay: {}", e)))
    }
}

/// Composite `overlay` on top of the page's existing content.
///
/// The existing content streams are bracketed by `q`/`Q` so whatever graphics
/// state they leave behind (CTM, colours, clipping) does not apply to the
/// overlay. Only the page's own `/Contents` entry is rewritten; the streams it
/// referenced are left untouched, so pages sharing them are unaffected.
pub fn merge_onto_page(
    doc: &mut Document,
    page_id: ObjectId,
    overlay: &Overlay,
) -> Result<(), StampError> {
    let overlay_bytes = overlay.encode()?;

    let existing = doc
        .get_dictionary(page_id)
        .map_err(|e| StampError::OperationError(format!("Invalid page dictionary: {}", e)))?
        .get(b"Contents")
        .ok()
        .cloned();

    let mut contents = match existing {
        Some(Object::Reference(id)) => match doc.get_object(id) {
            // An indirect array of streams is flattened into the new array
            Ok(Object::Array(arr)) => arr.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(arr)) => arr,
        Some(Object::Stream(stream)) => {
            vec![Object::Reference(doc.add_object(Object::Stream(stream)))]
        }
        _ => Vec::new(),
    };

    if !contents.is_empty() {
        let open_id = add_content_stream(doc, b"q\n".to_vec());
        let close_id = add_content_stream(doc, b"\nQ\n".to_vec());
        contents.insert(0, Object::Reference(open_id));
        contents.push(Object::Reference(close_id));
    }

    let overlay_id = add_content_stream(doc, overlay_bytes);
    contents.push(Object::Reference(overlay_id));

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| StampError::OperationError(format!("Invalid page dictionary: {}", e)))?;
    page.set("Contents", Object::Array(contents));

    Ok(())
}

fn add_content_stream(doc: &mut Document, bytes: Vec<u8>) -> ObjectId {
    doc.add_object(Object::Stream(Stream::new(Dictionary::new(), bytes)))
}

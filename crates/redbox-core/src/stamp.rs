//! Draw a box on the first page of a PDF
//!
//! The algorithm:
//! 1. Parse the document, fail if it has no pages
//! 2. Resolve the first page's media box
//! 3. Flip the caller's rectangle into PDF space and build the overlay
//! 4. Merge the overlay onto the first page; every other page is left as is
//! 5. Serialize the whole document

use crate::error::StampError;
use crate::geometry::{CallerRect, PageBox, PdfRect};
use crate::overlay::{merge_onto_page, Overlay};
use crate::page::{first_page_id, resolve_media_box};
use lopdf::Document;
use tracing::{debug, info};

/// Result of a successful stamp
#[derive(Debug, Clone)]
pub struct StampOutcome {
    /// The modified document
    pub pdf: Vec<u8>,
    pub page_count: usize,
    /// Media box of the first page
    pub page_box: PageBox,
    /// Where the box ended up, in PDF page space
    pub drawn: PdfRect,
}

/// Outline `rect` in red on the first page of `pdf_bytes`
pub fn stamp_first_page(pdf_bytes: &[u8], rect: CallerRect) -> Result<StampOutcome, StampError> {
    let mut doc =
        Document::load_mem(pdf_bytes).map_err(|e| StampError::ParseError(e.to_string()))?;

    let page_count = doc.get_pages().len();
    let page_id = first_page_id(&doc)?;
    let page_box = resolve_media_box(&doc, page_id)?;

    debug!(
        "PDF page dimensions: width={}, height={}",
        page_box.width(),
        page_box.height()
    );

    let overlay = Overlay::new(page_box, rect);
    let drawn = overlay.rect();

    info!(
        "Drawing box at x={}, y={}, width={}, height={}",
        drawn.x, drawn.y, drawn.width, drawn.height
    );

    merge_onto_page(&mut doc, page_id, &overlay)?;

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| StampError::OperationError(format!("Failed to save PDF: {}", e)))?;

    Ok(StampOutcome {
        pdf: buffer,
        page_count,
        page_box: overlay.page_box(),
        drawn,
    })
}

/// Bytes-only form of [`stamp_first_page`]
pub fn draw_box_on_pdf(
    pdf_bytes: &[u8],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<Vec<u8>, StampError> {
    stamp_first_page(pdf_bytes, CallerRect::new(x, y, width, height)).map(|outcome| outcome.pdf)
}

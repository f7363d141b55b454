//! Red box overlay for PDF documents
//!
//! Outlines a caller-supplied rectangle on the first page of a PDF using
//! lopdf. Callers give coordinates with a top-left origin (as a browser
//! viewer reports them); they are flipped into PDF page space before drawing.
//! All pages other than the first are written back unchanged.

pub mod error;
pub mod geometry;
pub mod overlay;
pub mod page;
pub mod stamp;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::StampError;
pub use geometry::{CallerRect, PageBox, PdfRect};
pub use overlay::{Overlay, StrokeStyle};
pub use stamp::{draw_box_on_pdf, stamp_first_page, StampOutcome};

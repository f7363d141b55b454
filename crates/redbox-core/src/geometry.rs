//! Rectangles in the two coordinate systems the service deals with.
//!
//! Callers describe the box the way a browser does: origin at the top-left
//! corner of the page, y growing downwards. PDF page space puts the origin at
//! the bottom-left with y growing upwards. Units are PDF points in both.

/// Rectangle as supplied by the caller (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallerRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangle in PDF page space (bottom-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A page's media box, normalized so that `llx <= urx` and `lly <= ury`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl CallerRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Flip into PDF space for a page of the given height.
    ///
    /// `adjusted_y = page_height - y - height`. No clamping is applied: a
    /// rectangle that hangs off the page stays off the page.
    pub fn to_pdf_space(&self, page_height: f64) -> PdfRect {
        PdfRect {
            x: self.x,
            y: page_height - self.y - self.height,
            width: self.width,
            height: self.height,
        }
    }
}

impl PdfRect {
    /// True when every component survives narrowing to a PDF real number (f32)
    pub fn is_representable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| (*v as f32).is_finite())
    }
}

impl PageBox {
    /// Build from the four numbers of a `/MediaBox` array in any corner order
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            llx: x1.min(x2),
            lly: y1.min(y2),
            urx: x1.max(x2),
            ury: y1.max(y2),
        }
    }

    /// US Letter, 8.5 x 11 inches at 72 points per inch
    pub fn letter() -> Self {
        Self::from_corners(0.0, 0.0, 612.0, 792.0)
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }
}

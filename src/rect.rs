use crate::units::Pt;

/// An axis-aligned rectangle in page coordinates, given by its lower-left
/// (`x1`, `y1`) and upper-right (`x2`, `y2`) corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x1: Pt,
    /// Bottom edge
    pub y1: Pt,
    /// Right edge
    pub x2: Pt,
    /// Top edge
    pub y2: Pt,
}

impl Rect {
    /// Horizontal extent, `x2 - x1`
    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    /// Vertical extent, `y2 - y1`
    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

use super::breaker::LayoutResult;
use crate::font::{FontFamily, Style};
use crate::page::{Page, SpanFont, SpanLayout};
use crate::units::Pt;

/// Something laid out text can be drawn onto
pub trait Renderer {
    /// Draw `text` with its baseline starting at (`x`, `y`)
    fn draw(&mut self, text: &str, x: Pt, y: Pt, style: Style);
}

/// Where and how a [LayoutResult] is placed
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Left edge and baseline of the first line
    pub origin: (Pt, Pt),
    /// Distance between consecutive baselines
    pub line_pitch: Pt,
    /// Width lines were broken to, used for centering
    pub max_width: Pt,
    /// Offset of the first line from `origin`
    pub first_line_indent: Pt,
    /// Center the first line when the primary group was pushed off it
    pub center_first_line_if_wrapped: bool,
}

impl RenderOptions {
    /// No indent, no centering
    pub fn new(origin: (Pt, Pt), line_pitch: Pt, max_width: Pt) -> RenderOptions {
        RenderOptions {
            origin,
            line_pitch,
            max_width,
            first_line_indent: Pt::ZERO,
            center_first_line_if_wrapped: false,
        }
    }

    /// Start the first line `indent` to the right of the origin
    pub fn first_line_indent(&mut self, indent: Pt) -> &mut Self {
        self.first_line_indent = indent;
        self
    }

    /// Center the first line when the primary group wrapped
    pub fn center_first_line_if_wrapped(&mut self, center: bool) -> &mut Self {
        self.center_first_line_if_wrapped = center;
        self
    }
}

/// Draws every line of `layout`, token by token. Space tokens move the cursor
/// but draw nothing. Lines go down the page (PDF y grows upwards).
///
/// Returns the baseline the line after the last one would sit on.
pub fn render_layout<R: Renderer + ?Sized>(
    layout: &LayoutResult,
    renderer: &mut R,
    options: &RenderOptions,
) -> Pt {
    let (left, mut y) = options.origin;

    for (index, line) in layout.lines.iter().enumerate() {
        let mut x = if index == 0 {
            if options.center_first_line_if_wrapped && layout.first_group_wrapped {
                left + (options.max_width - line.width) / 2.0
            } else {
                left + options.first_line_indent
            }
        } else {
            left
        };

        for measured in line.tokens.iter() {
            if !measured.token.is_space() {
                renderer.draw(&measured.token.text, x, y, measured.token.style);
            }
            x += measured.width;
        }

        y -= options.line_pitch;
    }

    y
}

/// Draws onto a [Page] with the fonts of a [FontFamily]
pub struct PageRenderer<'a> {
    page: &'a mut Page,
    family: FontFamily,
    size: Pt,
}

impl<'a> PageRenderer<'a> {
    pub fn new(page: &'a mut Page, family: FontFamily, size: Pt) -> PageRenderer<'a> {
        PageRenderer { page, family, size }
    }
}

impl Renderer for PageRenderer<'_> {
    fn draw(&mut self, text: &str, x: Pt, y: Pt, style: Style) {
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.family.font(style),
                size: self.size,
            },
            coords: (x, y),
        });
    }
}

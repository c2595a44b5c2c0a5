//! Test doubles for the layout collaborators.

use super::render::Renderer;
use crate::font::{Style, TextMeasurer};
use crate::units::Pt;

/// Every character is one `size` wide, whatever the style
pub(crate) struct Monospace;

impl TextMeasurer for Monospace {
    fn measure(&self, text: &str, _style: Style, size: Pt) -> Pt {
        size * text.chars().count() as f32
    }
}

/// Like [Monospace], but bold characters are half again as wide
pub(crate) struct WideBold;

impl TextMeasurer for WideBold {
    fn measure(&self, text: &str, style: Style, size: Pt) -> Pt {
        let advance = match style {
            Style::Normal => 1.0,
            Style::Bold => 1.5,
        };
        size * (text.chars().count() as f32 * advance)
    }
}

/// Remembers every draw call
#[derive(Default)]
pub(crate) struct Recorder {
    pub calls: Vec<(String, Pt, Pt, Style)>,
}

impl Renderer for Recorder {
    fn draw(&mut self, text: &str, x: Pt, y: Pt, style: Style) {
        self.calls.push((text.to_string(), x, y, style));
    }
}

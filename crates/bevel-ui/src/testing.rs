//! Deterministic text backend for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use bevel_engine::paint::Color;
use bevel_engine::raster::Image;
use bevel_engine::text::{Font, FontId, TextBackend};

use crate::widget::SharedText;

/// Every character is `advance` pixels wide and renders as a solid block
/// `font.size` pixels tall, so pixel assertions do not depend on a font file.
pub(crate) struct FixedAdvance {
    advance: u32,
    requests: RefCell<Vec<(String, f32, bool, bool)>>,
}

impl FixedAdvance {
    pub(crate) fn new(advance: u32) -> Self {
        Self { advance, requests: RefCell::new(Vec::new()) }
    }

    pub(crate) fn shared(advance: u32) -> SharedText {
        Rc::new(Self::new(advance))
    }

    /// `system_font` calls seen so far.
    pub(crate) fn requests(&self) -> Vec<(String, f32, bool, bool)> {
        self.requests.borrow().clone()
    }
}

impl TextBackend for FixedAdvance {
    fn system_font(&self, family: &str, size: f32, bold: bool, italic: bool) -> Font {
        self.requests
            .borrow_mut()
            .push((family.to_string(), size, bold, italic));
        Font::new(FontId::from_index(1), size)
    }

    fn default_font(&self, pixel_height: f32) -> Font {
        Font::new(FontId::from_index(0), pixel_height)
    }

    fn measure_text(&self, _font: Font, text: &str) -> u32 {
        text.chars().count() as u32 * self.advance
    }

    fn render_text(&self, font: Font, text: &str, color: Color) -> Image {
        Image::filled(self.measure_text(font, text), font.size.ceil() as u32, color)
    }
}

use bevel_engine::coords::{Point, Rect};
use bevel_engine::paint::{BevelTones, Color};
use bevel_engine::raster::Image;
use bevel_engine::text::{Font, TextBackend};

/// Which way a bevel faces.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BevelStyle {
    /// Lit from the top-left: the resting button look.
    Raised,
    /// Lit from the bottom-right: pressed buttons.
    Pressed,
    /// Recessed well: entry borders.
    Sunken,
}

/// Drawing surface passed to widget render passes.
///
/// Wraps a widget's backing image together with the text backend so render
/// code can fill, bevel and print without threading both around.
pub struct Painter<'a> {
    image: &'a mut Image,
    fonts: &'a dyn TextBackend,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(image: &'a mut Image, fonts: &'a dyn TextBackend) -> Self {
        Self { image, fonts }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    // ── primitives ────────────────────────────────────────────────────────

    pub fn fill(&mut self, color: Color) {
        self.image.fill(color);
    }

    pub fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.image.fill_rect(color, rect);
    }

    // ── bevel ─────────────────────────────────────────────────────────────

    /// Paints the four-tone bevel over the whole image and leaves the face
    /// `(2, 2, w-4, h-4)` filled with `tones.face`.
    ///
    /// Each step covers the previous one except for a one pixel band, so the
    /// visible edges are: outer bottom-right, outer top-left, inner
    /// bottom-right, inner top-left.
    pub fn bevel(&mut self, tones: &BevelTones, style: BevelStyle) {
        let (w, h) = (self.width(), self.height());
        let [base, outer, inner, soft] = match style {
            BevelStyle::Raised => [tones.deep, tones.light, tones.shadow, tones.soft],
            BevelStyle::Pressed => [tones.light, tones.shadow, tones.soft, tones.deep],
            BevelStyle::Sunken => [tones.light, tones.deep, tones.soft, tones.shadow],
        };
        self.fill(base);
        self.fill_rect(outer, Rect::new(0, 0, w - 1, h - 1));
        self.fill_rect(inner, Rect::new(1, 1, w - 2, h - 2));
        self.fill_rect(soft, Rect::new(1, 1, w - 3, h - 3));
        self.fill_rect(tones.face, Self::face_rect(w, h));
    }

    /// Interior left by [`bevel`](Self::bevel).
    #[inline]
    pub fn face_rect(w: i32, h: i32) -> Rect {
        Rect::new(2, 2, w - 4, h - 4)
    }

    // ── text ──────────────────────────────────────────────────────────────

    pub fn measure_text(&self, font: Font, text: &str) -> i32 {
        self.fonts.measure_text(font, text) as i32
    }

    /// Renders `text` with its top-left corner at `at`, clipped to the image.
    pub fn text(&mut self, font: Font, text: &str, color: Color, at: Point) {
        let clip = self.image.bounds();
        self.text_clipped(font, text, color, at, clip);
    }

    /// Renders `text` at `at`, touching only pixels inside `clip`.
    pub fn text_clipped(&mut self, font: Font, text: &str, color: Color, at: Point, clip: Rect) {
        if text.is_empty() {
            return;
        }
        let glyphs = self.fonts.render_text(font, text, color);
        self.image.blit_clipped(&glyphs, at, clip);
    }
}

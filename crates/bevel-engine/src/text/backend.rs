use crate::paint::Color;
use crate::raster::Image;

/// Opaque handle to a font face loaded into a text backend.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// Builds a handle from a backend-specific index.
    ///
    /// Only meaningful to the backend that issued the index; intended for
    /// alternate [`TextBackend`] implementations.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A face at a pixel size. This is what widgets hold and pass back to the
/// backend for measuring and rendering.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Font {
    pub id: FontId,
    /// Font size in pixels.
    pub size: f32,
}

impl Font {
    #[inline]
    pub const fn new(id: FontId, size: f32) -> Self {
        Self { id, size }
    }
}

/// Text measurement, rasterization and font resolution.
///
/// Implementations must be deterministic: measuring or rendering the same
/// string with the same font always gives the same result.
pub trait TextBackend {
    /// Resolves a face by family name and style at `size` pixels.
    ///
    /// Unknown families fall back to the default face at the requested size.
    fn system_font(&self, family: &str, size: f32, bold: bool, italic: bool) -> Font;

    /// The default face sized to `pixel_height`.
    fn default_font(&self, pixel_height: f32) -> Font;

    /// Advance width of `text` in whole pixels (rounded up).
    fn measure_text(&self, font: Font, text: &str) -> u32;

    /// Rasterizes `text` in `color` onto a transparent image exactly
    /// [`measure_text`](Self::measure_text) pixels wide.
    fn render_text(&self, font: Font, text: &str, color: Color) -> Image;
}

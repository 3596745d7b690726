use std::collections::HashMap;
use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::paint::Color;
use crate::raster::Image;

use super::backend::{Font, FontId, TextBackend};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct FaceStyle {
    bold: bool,
    italic: bool,
}

/// Owns a collection of loaded fonts, indexed by family and style.
///
/// Fonts are immutable after loading. The first loaded face is the default
/// face; with no faces loaded every string measures 0 pixels wide and renders
/// as an empty image.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    families: HashMap<String, Vec<(FaceStyle, FontId)>>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new(), families: HashMap::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    ///
    /// The face is not attached to any family; it is reachable through its
    /// `FontId` and, if it is the first one loaded, as the default face.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font face #{}", id.0);
        Ok(id)
    }

    /// Loads a face and registers it under `family` with the given style.
    ///
    /// Family names are matched case-insensitively with spaces ignored.
    pub fn load_family(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        bytes: &[u8],
    ) -> Result<FontId, FontLoadError> {
        let id = self.load_font(bytes)?;
        self.families
            .entry(family_key(family))
            .or_default()
            .push((FaceStyle { bold, italic }, id));
        log::debug!("registered face #{} as {family} (bold={bold}, italic={italic})", id.0);
        Ok(id)
    }

    /// Number of loaded faces.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    fn layout(&self, face: &fontdue::Font, text: &str, size: f32) -> Layout<()> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[face], &TextStyle::new(text, size, 0));
        layout
    }

    fn line_height(&self, font: Font) -> u32 {
        let fallback = font.size * 1.2;
        let h = self
            .get(font.id)
            .and_then(|f| f.horizontal_line_metrics(font.size))
            .map(|m| m.new_line_size)
            .unwrap_or(fallback);
        h.ceil().max(1.0) as u32
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBackend for FontSystem {
    fn system_font(&self, family: &str, size: f32, bold: bool, italic: bool) -> Font {
        let wanted = FaceStyle { bold, italic };
        let regular = FaceStyle { bold: false, italic: false };

        let id = self.families.get(&family_key(family)).and_then(|faces| {
            faces
                .iter()
                .find(|(style, _)| *style == wanted)
                .or_else(|| faces.iter().find(|(style, _)| *style == regular))
                .or_else(|| faces.first())
                .map(|(_, id)| *id)
        });

        match id {
            Some(id) => Font::new(id, size),
            None => {
                log::debug!("no face for family {family:?}; using default face");
                self.default_font(size)
            }
        }
    }

    fn default_font(&self, pixel_height: f32) -> Font {
        Font::new(FontId(0), pixel_height)
    }

    fn measure_text(&self, font: Font, text: &str) -> u32 {
        let Some(face) = self.get(font.id) else {
            return 0;
        };
        let layout = self.layout(face, text, font.size);

        // Use the pen position *after* each glyph rather than the bitmap right
        // edge so trailing spaces and side bearings count toward the width.
        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = face.metrics_indexed(g.key.glyph_index, font.size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        w.ceil() as u32
    }

    fn render_text(&self, font: Font, text: &str, color: Color) -> Image {
        let height = self.line_height(font);
        let Some(face) = self.get(font.id) else {
            return Image::new(0, height);
        };

        let width = self.measure_text(font, text);
        let layout = self.layout(face, text, font.size);
        let height = height.max(layout.height().ceil() as u32);
        let mut img = Image::new(width, height);
        let buf = img.as_rgba_mut();

        for g in layout.glyphs() {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (_, coverage) = face.rasterize_config(g.key);
            for row in 0..g.height {
                for col in 0..g.width {
                    let cov = coverage[row * g.width + col];
                    if cov == 0 {
                        continue;
                    }
                    let x = g.x.round() as i64 + col as i64;
                    let y = g.y.round() as i64 + row as i64;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        continue;
                    }
                    let a = (cov as u32 * color.a as u32 / 255) as u8;
                    let px = buf.get_pixel_mut(x as u32, y as u32);
                    // Overlapping glyph edges keep the stronger coverage.
                    if a > px.0[3] {
                        *px = image::Rgba([color.r, color.g, color.b, a]);
                    }
                }
            }
        }

        img
    }
}

fn family_key(family: &str) -> String {
    family
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

//! Normalization of loosely specified colors and fonts.
//!
//! Widgets accept colors and fonts in several shapes. Everything funnels
//! through [`coerce_color`] and [`resolve_font`], which never fail: bad input
//! degrades to a documented default.

use bevel_engine::paint::Color;
use bevel_engine::text::{Font, TextBackend};

/// Default widget fill, light gray.
pub const DEFAULT_FILL: Color = Color::from_rgb_u32(0xf0f0f0);
/// Default text color.
pub const DEFAULT_TEXT: Color = Color::BLACK;
/// Text color used for inactive widgets and entry prompts.
pub const MUTED_TEXT: Color = Color::from_rgba_u32(0x6d6d6dff);

// ── colors ────────────────────────────────────────────────────────────────

/// A color as supplied by application code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    /// Explicit channels, always opaque.
    Rgb([u8; 3]),
    /// `0xRRGGBB` when it fits 24 bits, `0xRRGGBBAA` otherwise.
    Packed(u32),
    /// Color name or hex literal, see [`Color::parse`].
    Name(String),
    /// Already a color.
    Color(Color),
}

impl From<[u8; 3]> for ColorSpec {
    fn from(v: [u8; 3]) -> Self {
        ColorSpec::Rgb(v)
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorSpec::Rgb([r, g, b])
    }
}

impl From<u32> for ColorSpec {
    fn from(v: u32) -> Self {
        ColorSpec::Packed(v)
    }
}

impl From<&str> for ColorSpec {
    fn from(v: &str) -> Self {
        ColorSpec::Name(v.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(v: String) -> Self {
        ColorSpec::Name(v)
    }
}

impl From<Color> for ColorSpec {
    fn from(v: Color) -> Self {
        ColorSpec::Color(v)
    }
}

/// Resolves `spec` to a concrete color, falling back to `default` when a
/// name or hex string does not parse.
pub fn coerce_color(spec: &ColorSpec, default: Color) -> Color {
    match spec {
        ColorSpec::Rgb(rgb) => Color::from(*rgb),
        ColorSpec::Packed(v) if *v <= 0x00ff_ffff => Color::from_rgb_u32(*v),
        ColorSpec::Packed(v) => Color::from_rgba_u32(*v),
        ColorSpec::Name(s) => Color::parse(s).unwrap_or_else(|| {
            log::debug!("unparseable color {s:?}; using default");
            default
        }),
        ColorSpec::Color(c) => *c,
    }
}

// ── fonts ─────────────────────────────────────────────────────────────────

/// A font as supplied by application code.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSpec {
    /// An already resolved face.
    Font(Font),
    /// Compact descriptor `<family>_<size><flags>`, e.g. `"arial_14b"`.
    Descriptor(String),
    /// No preference; the widget picks a default face sized to its height.
    Default,
}

impl From<Font> for FontSpec {
    fn from(v: Font) -> Self {
        FontSpec::Font(v)
    }
}

impl From<&str> for FontSpec {
    fn from(v: &str) -> Self {
        FontSpec::Descriptor(v.to_string())
    }
}

impl From<String> for FontSpec {
    fn from(v: String) -> Self {
        FontSpec::Descriptor(v)
    }
}

/// Parsed form of a `<family>_<size><flags>` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
}

/// Parses `<family>_<size><flags>`.
///
/// Exactly one underscore is allowed. The decimal digits right after it are
/// the pixel size; the letters after the digits are flags, `b` for bold and
/// `i` for italic (other letters are ignored). Returns `None` when the shape
/// does not match or no digits are present.
pub fn parse_font_descriptor(s: &str) -> Option<FontDescriptor> {
    if s.matches('_').count() != 1 {
        return None;
    }
    let (family, rest) = s.split_once('_')?;

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Digits are ASCII, so `digits` is a char boundary.
    let (size, flags) = rest.split_at(digits);
    let size = size.parse().ok()?;

    Some(FontDescriptor {
        family: family.to_string(),
        size,
        bold: flags.contains('b'),
        italic: flags.contains('i'),
    })
}

/// Resolves `spec` against `backend`.
///
/// `None` means "no font chosen"; callers fall back to
/// `backend.default_font(rect_height)`.
pub fn resolve_font(spec: &FontSpec, backend: &dyn TextBackend) -> Option<Font> {
    match spec {
        FontSpec::Font(f) => Some(*f),
        FontSpec::Descriptor(s) => {
            let Some(d) = parse_font_descriptor(s) else {
                log::debug!("malformed font descriptor {s:?}; using default face");
                return None;
            };
            Some(backend.system_font(&d.family, d.size as f32, d.bold, d.italic))
        }
        FontSpec::Default => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedAdvance;
    use bevel_engine::text::FontId;

    const FALLBACK: Color = Color::rgb(1, 2, 3);

    // ── coerce_color ──────────────────────────────────────────────────────

    #[test]
    fn triple_is_opaque() {
        assert_eq!(coerce_color(&[10u8, 20, 30].into(), FALLBACK), Color::rgb(10, 20, 30));
    }

    #[test]
    fn packed_24_bit_is_opaque_rgb() {
        assert_eq!(coerce_color(&0xf0f0f0u32.into(), FALLBACK), Color::rgb(0xf0, 0xf0, 0xf0));
        assert_eq!(coerce_color(&0u32.into(), FALLBACK), Color::BLACK);
        assert_eq!(coerce_color(&0xffffffu32.into(), FALLBACK), Color::WHITE);
    }

    #[test]
    fn packed_wider_than_24_bits_is_rgba() {
        assert_eq!(
            coerce_color(&0x6d6d6dffu32.into(), FALLBACK),
            Color::rgba(0x6d, 0x6d, 0x6d, 0xff)
        );
        assert_eq!(
            coerce_color(&0x11223344u32.into(), FALLBACK),
            Color::rgba(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn names_and_hex_strings_parse() {
        assert_eq!(coerce_color(&"red".into(), FALLBACK), Color::rgb(255, 0, 0));
        assert_eq!(coerce_color(&"#00ff00".into(), FALLBACK), Color::rgb(0, 255, 0));
    }

    #[test]
    fn malformed_strings_return_exactly_the_default() {
        for bad in ["", "#", "#12", "#fff", "blurple", "0xZZZZZZ", "ü", "  "] {
            assert_eq!(coerce_color(&bad.into(), FALLBACK), FALLBACK, "input {bad:?}");
        }
    }

    #[test]
    fn colors_pass_through() {
        let c = Color::rgba(9, 8, 7, 6);
        assert_eq!(coerce_color(&c.into(), FALLBACK), c);
    }

    // ── parse_font_descriptor ─────────────────────────────────────────────

    #[test]
    fn descriptor_with_flags() {
        assert_eq!(
            parse_font_descriptor("arial_14bi"),
            Some(FontDescriptor { family: "arial".into(), size: 14, bold: true, italic: true })
        );
    }

    #[test]
    fn descriptor_without_flags() {
        let d = parse_font_descriptor("mono_9").unwrap();
        assert_eq!(d.size, 9);
        assert!(!d.bold && !d.italic);
    }

    #[test]
    fn descriptor_italic_only() {
        let d = parse_font_descriptor("serif_120i").unwrap();
        assert_eq!(d.size, 120);
        assert!(!d.bold && d.italic);
    }

    #[test]
    fn malformed_descriptors() {
        assert_eq!(parse_font_descriptor("arial"), None);
        assert_eq!(parse_font_descriptor("arial_b"), None);
        assert_eq!(parse_font_descriptor("a_b_12"), None);
        assert_eq!(parse_font_descriptor("arial_"), None);
        assert_eq!(parse_font_descriptor("arial_99999999999"), None);
    }

    // ── resolve_font ──────────────────────────────────────────────────────

    #[test]
    fn handle_passes_through() {
        let backend = FixedAdvance::new(6);
        let f = Font::new(FontId::from_index(3), 11.0);
        assert_eq!(resolve_font(&f.into(), &backend), Some(f));
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn descriptor_asks_backend() {
        let backend = FixedAdvance::new(6);
        let f = resolve_font(&"courier_12b".into(), &backend).unwrap();
        assert_eq!(f.size, 12.0);
        assert_eq!(backend.requests(), vec![("courier".to_string(), 12.0, true, false)]);
    }

    #[test]
    fn default_and_malformed_resolve_to_none() {
        let backend = FixedAdvance::new(6);
        assert_eq!(resolve_font(&FontSpec::Default, &backend), None);
        assert_eq!(resolve_font(&"courier".into(), &backend), None);
        assert!(backend.requests().is_empty());
    }
}

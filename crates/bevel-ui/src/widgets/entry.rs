use std::time::{Duration, Instant};

use bevel_engine::coords::{Point, Rect};
use bevel_engine::paint::{BevelTones, Color};
use bevel_engine::text::Font;

use crate::coerce::{coerce_color, resolve_font, ColorSpec, FontSpec, DEFAULT_FILL, DEFAULT_TEXT, MUTED_TEXT};
use crate::error::WidgetError;
use crate::painter::{BevelStyle, Painter};
use crate::widget::{SharedText, Widget, WidgetCore};

/// Left and right text margin inside the widget rectangle.
const TEXT_INSET: i32 = 4;
const CARET_GAP: i32 = 1;
const CARET_WIDTH: i32 = 1;

// ── configuration ─────────────────────────────────────────────────────────

/// Attribute patch for [`Entry::new`] and [`Entry::configure`].
///
/// Focus is not part of the patch; it is owned by the
/// [`EntryGroup`](crate::focus::EntryGroup) the entry lives in.
#[derive(Debug, Clone, Default)]
pub struct EntryConfig {
    pub rect: Option<Rect>,
    pub text: Option<String>,
    pub prompt: Option<String>,
    pub allow_empty: Option<bool>,
    pub color: Option<ColorSpec>,
    pub textcolor: Option<ColorSpec>,
    pub active: Option<bool>,
    pub font: Option<FontSpec>,
}

impl EntryConfig {
    pub fn new() -> Self { Self::default() }

    pub fn rect(mut self, v: impl Into<Rect>) -> Self { self.rect = Some(v.into()); self }
    pub fn text(mut self, v: impl Into<String>) -> Self { self.text = Some(v.into()); self }
    pub fn prompt(mut self, v: impl Into<String>) -> Self { self.prompt = Some(v.into()); self }
    pub fn allow_empty(mut self, v: bool) -> Self { self.allow_empty = Some(v); self }
    pub fn color(mut self, v: impl Into<ColorSpec>) -> Self { self.color = Some(v.into()); self }
    pub fn textcolor(mut self, v: impl Into<ColorSpec>) -> Self { self.textcolor = Some(v.into()); self }
    pub fn active(mut self, v: bool) -> Self { self.active = Some(v); self }
    pub fn font(mut self, v: impl Into<FontSpec>) -> Self { self.font = Some(v.into()); self }

    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
            && self.text.is_none()
            && self.prompt.is_none()
            && self.allow_empty.is_none()
            && self.color.is_none()
            && self.textcolor.is_none()
            && self.active.is_none()
            && self.font.is_none()
    }
}

/// Snapshot of an entry's attributes returned by [`Entry::configure`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySettings {
    pub rect: Rect,
    pub text: String,
    pub prompt: String,
    pub allow_empty: bool,
    pub color: Color,
    pub textcolor: Color,
    pub active: bool,
    pub focused: bool,
    pub font: Option<Font>,
}

// ── Entry ─────────────────────────────────────────────────────────────────

/// A single-line text input.
///
/// Entries do not handle input on their own: an
/// [`EntryGroup`](crate::focus::EntryGroup) decides which one is focused and
/// forwards pointer and key events to it.
pub struct Entry {
    core: WidgetCore,
    fonts: SharedText,
    prompt: String,
    allow_empty: bool,
    color: Color,
    textcolor: Color,
    active: bool,
    focused: bool,
    font: Option<Font>,
    focus_time: Option<Instant>,
    caret_visible: bool,
}

impl Entry {
    /// Creates an unfocused entry and renders it once.
    ///
    /// `config.rect`, when set, takes precedence over `rect`. The fill
    /// defaults to white, also when `config.color` does not parse.
    pub fn new(rect: Rect, config: EntryConfig, fonts: SharedText) -> Result<Self, WidgetError> {
        let rect = config.rect.unwrap_or(rect);
        let mut entry = Self {
            core: WidgetCore::new(rect, "")?,
            fonts,
            prompt: String::new(),
            allow_empty: true,
            color: Color::WHITE,
            textcolor: DEFAULT_TEXT,
            active: true,
            focused: false,
            font: None,
            focus_time: None,
            caret_visible: false,
        };
        entry.apply(config, Color::WHITE)?;
        entry.render_full(true);
        Ok(entry)
    }

    /// Current text.
    #[inline]
    pub fn get_text(&self) -> &str {
        self.core.text()
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// False when the text is empty and empty text is not allowed.
    pub fn is_valid(&self) -> bool {
        self.allow_empty || !self.core.text().is_empty()
    }

    #[inline]
    pub fn caret_visible(&self) -> bool {
        self.focused && self.caret_visible
    }

    pub fn settings(&self) -> EntrySettings {
        EntrySettings {
            rect: self.core.rect(),
            text: self.core.text().to_string(),
            prompt: self.prompt.clone(),
            allow_empty: self.allow_empty,
            color: self.color,
            textcolor: self.textcolor,
            active: self.active,
            focused: self.focused,
            font: self.font,
        }
    }

    /// Applies `patch` and re-renders once, or just reports the current
    /// settings when the patch is empty.
    ///
    /// Deactivating a focused entry drops its focus.
    pub fn configure(&mut self, patch: EntryConfig) -> Result<EntrySettings, WidgetError> {
        if patch.is_empty() {
            return Ok(self.settings());
        }
        self.apply(patch, DEFAULT_FILL)?;
        self.render_full(true);
        log::trace!("entry reconfigured: {:?}", self.core.rect());
        Ok(self.settings())
    }

    /// `fill_fallback` replaces a `color` that does not parse.
    fn apply(&mut self, patch: EntryConfig, fill_fallback: Color) -> Result<(), WidgetError> {
        // First, so a bad rectangle rejects the patch before anything changes.
        if let Some(rect) = patch.rect {
            self.core.set_rect(rect)?;
        }
        if let Some(text) = patch.text {
            self.core.text = text;
        }
        if let Some(prompt) = patch.prompt {
            self.prompt = prompt;
        }
        if let Some(allow_empty) = patch.allow_empty {
            self.allow_empty = allow_empty;
        }
        if let Some(spec) = &patch.color {
            self.color = coerce_color(spec, fill_fallback);
        }
        if let Some(spec) = &patch.textcolor {
            self.textcolor = coerce_color(spec, DEFAULT_TEXT);
        }
        if let Some(active) = patch.active {
            self.active = active;
            if !active {
                self.clear_focus();
            }
        }
        if let Some(spec) = &patch.font {
            self.font = resolve_font(spec, &*self.fonts);
        }
        Ok(())
    }

    // ── focus & editing (driven by EntryGroup) ────────────────────────────

    /// Focuses the entry and restarts the caret blink at `now`.
    pub(crate) fn focus(&mut self, now: Instant) {
        self.focused = true;
        self.focus_time = Some(now);
        self.caret_visible = true;
        self.render_full(true);
    }

    /// Drops focus. Returns `false` (and skips rendering) when the entry was
    /// not focused.
    pub(crate) fn blur(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.clear_focus();
        self.render_full(false);
        true
    }

    fn clear_focus(&mut self) {
        self.focused = false;
        self.focus_time = None;
        self.caret_visible = false;
    }

    pub(crate) fn push_char(&mut self, c: char) {
        self.core.text.push(c);
        self.render_full(false);
    }

    /// Removes the last character. Returns `false` on empty text.
    pub(crate) fn delete_last(&mut self) -> bool {
        if self.core.text.pop().is_none() {
            return false;
        }
        self.render_full(false);
        true
    }

    /// Recomputes the caret phase for `now`; renders and returns `true` only
    /// when visibility flips. A zero `blink` keeps the caret steady.
    pub(crate) fn update_caret(&mut self, now: Instant, blink: Duration) -> bool {
        let Some(start) = self.focus_time else {
            return false;
        };
        let visible = blink.is_zero()
            || (now.saturating_duration_since(start).as_nanos() / blink.as_nanos()) % 2 == 0;
        if visible == self.caret_visible {
            return false;
        }
        self.caret_visible = visible;
        self.render_full(false);
        true
    }

    // ── rendering ─────────────────────────────────────────────────────────

    fn effective_font(&self) -> Font {
        self.font
            .unwrap_or_else(|| self.fonts.default_font(self.core.rect().h as f32))
    }

    /// Redraws the entry. `full` repaints the sunken border too; otherwise
    /// only the face, text and caret are repainted.
    pub fn render_full(&mut self, full: bool) {
        let font = self.effective_font();
        let tones = BevelTones::from_base(self.color);
        let Rect { w, h, .. } = self.core.rect();
        let face = Painter::face_rect(w, h);

        let (shown, color) = if self.core.text().is_empty() && !self.focused {
            (self.prompt.clone(), MUTED_TEXT)
        } else {
            let color = if self.active { self.textcolor } else { MUTED_TEXT };
            (self.core.text().to_string(), color)
        };
        let focused = self.focused;
        let caret = self.caret_visible();

        let mut p = self.core.painter(&*self.fonts);
        if full {
            p.bevel(&tones, BevelStyle::Sunken);
        } else {
            p.fill_rect(tones.face, face);
        }

        // Keep the end of the text (and the caret) in view.
        let width = p.measure_text(font, &shown);
        let needed = if focused { width + CARET_GAP + CARET_WIDTH } else { width };
        let room = w - 2 * TEXT_INSET;
        let x = TEXT_INSET + (room - needed).min(0);

        p.text_clipped(font, &shown, color, Point::new(x, h / 6), face);
        if caret {
            let bar = Rect::new(x + width + CARET_GAP, 3, CARET_WIDTH, h - 6);
            if let Some(bar) = bar.intersect(face) {
                p.fill_rect(color, bar);
            }
        }
    }
}

impl Widget for Entry {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn render(&mut self) {
        self.render_full(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedAdvance;
    use bevel_engine::text::FontId;

    const SMALL: Font = Font::new(FontId::from_index(0), 8.0);
    const RED: Color = Color::rgb(255, 0, 0);

    fn entry(config: EntryConfig) -> Entry {
        Entry::new(Rect::new(0, 0, 100, 20), config, FixedAdvance::shared(6)).unwrap()
    }

    // ── construction & settings ───────────────────────────────────────────

    #[test]
    fn defaults() {
        let e = entry(EntryConfig::new());
        let s = e.settings();
        assert_eq!(s.color, Color::WHITE);
        assert_eq!(s.textcolor, Color::BLACK);
        assert!(s.active && s.allow_empty && !s.focused);
        assert_eq!(e.get_text(), "");
        assert_eq!(e.revision(), 1);
    }

    #[test]
    fn constructor_falls_back_to_white_fill() {
        let e = entry(EntryConfig::new().color("bogus"));
        assert_eq!(e.settings().color, Color::WHITE);
        assert_eq!(e.image().pixel(50, 10), Some(Color::WHITE));
    }

    #[test]
    fn configure_falls_back_to_gray_fill() {
        let mut e = entry(EntryConfig::new());
        let s = e.configure(EntryConfig::new().color("not a color")).unwrap();
        assert_eq!(s.color, Color::rgb(0xf0, 0xf0, 0xf0));
    }

    #[test]
    fn empty_configure_does_not_render() {
        let mut e = entry(EntryConfig::new().text("hi"));
        let r0 = e.revision();
        assert_eq!(e.configure(EntryConfig::new()).unwrap().text, "hi");
        assert_eq!(e.revision(), r0);
        e.configure(EntryConfig::new().prompt("Name")).unwrap();
        assert_eq!(e.revision(), r0 + 1);
    }

    #[test]
    fn invalid_rect_fails_atomically() {
        let mut e = entry(EntryConfig::new().text("keep"));
        assert!(e.configure(EntryConfig::new().text("lost").rect((0, 0, 0, 5))).is_err());
        assert_eq!(e.get_text(), "keep");
    }

    #[test]
    fn validity_tracks_allow_empty() {
        let mut e = entry(EntryConfig::new().allow_empty(false));
        assert!(!e.is_valid());
        e.push_char('x');
        assert!(e.is_valid());
        e.configure(EntryConfig::new().allow_empty(true).text("")).unwrap();
        assert!(e.is_valid());
    }

    #[test]
    fn deactivating_drops_focus() {
        let mut e = entry(EntryConfig::new());
        e.focus(Instant::now());
        assert!(!e.configure(EntryConfig::new().active(false)).unwrap().focused);
    }

    // ── editing ───────────────────────────────────────────────────────────

    #[test]
    fn type_and_delete() {
        let mut e = entry(EntryConfig::new());
        e.focus(Instant::now());
        e.push_char('a');
        assert_eq!(e.get_text(), "a");
        assert!(e.delete_last());
        assert_eq!(e.get_text(), "");
    }

    #[test]
    fn delete_on_empty_is_a_no_op() {
        let mut e = entry(EntryConfig::new());
        let r0 = e.revision();
        assert!(!e.delete_last());
        assert_eq!(e.revision(), r0);
    }

    #[test]
    fn delete_removes_a_whole_character() {
        let mut e = entry(EntryConfig::new().text("hé"));
        e.delete_last();
        assert_eq!(e.get_text(), "h");
    }

    #[test]
    fn blur_without_focus_does_nothing() {
        let mut e = entry(EntryConfig::new());
        let r0 = e.revision();
        assert!(!e.blur());
        assert_eq!(e.revision(), r0);
    }

    // ── caret ─────────────────────────────────────────────────────────────

    #[test]
    fn caret_blinks_from_focus_time() {
        let t0 = Instant::now();
        let blink = Duration::from_millis(500);
        let mut e = entry(EntryConfig::new());
        e.focus(t0);
        assert!(e.caret_visible());

        assert!(!e.update_caret(t0 + Duration::from_millis(499), blink));
        assert!(e.update_caret(t0 + Duration::from_millis(600), blink));
        assert!(!e.caret_visible());
        assert!(!e.update_caret(t0 + Duration::from_millis(900), blink));
        assert!(e.update_caret(t0 + Duration::from_millis(1000), blink));
        assert!(e.caret_visible());
    }

    #[test]
    fn unfocused_entry_ignores_blink() {
        let mut e = entry(EntryConfig::new());
        assert!(!e.update_caret(Instant::now(), Duration::from_millis(1)));
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn prompt_shows_muted_when_empty_and_unfocused() {
        let mut e = entry(EntryConfig::new().prompt("Name").font(SMALL));
        assert_eq!(e.image().pixel(4, 3), Some(MUTED_TEXT));

        e.focus(Instant::now());
        assert_eq!(e.image().pixel(4, 3), Some(Color::WHITE));
        // Caret right after the (empty) text.
        assert_eq!(e.image().pixel(5, 3), Some(Color::BLACK));
    }

    #[test]
    fn text_uses_text_color() {
        let e = entry(EntryConfig::new().text("ab").textcolor(RED).font(SMALL));
        assert_eq!(e.image().pixel(4, 3), Some(RED));
        assert_eq!(e.image().pixel(15, 3), Some(RED));
        assert_eq!(e.image().pixel(16, 3), Some(Color::WHITE));
    }

    #[test]
    fn sunken_border() {
        let e = entry(EntryConfig::new());
        let t = BevelTones::from_base(Color::WHITE);
        assert_eq!(e.image().pixel(0, 0), Some(t.deep));
        assert_eq!(e.image().pixel(99, 19), Some(t.light));
    }

    #[test]
    fn overflowing_text_is_shifted_and_clipped() {
        let mut e = Entry::new(
            Rect::new(0, 0, 40, 20),
            EntryConfig::new().text("abcdefgh").textcolor(RED).font(SMALL),
            FixedAdvance::shared(6),
        )
        .unwrap();
        e.focus(Instant::now());
        // 48px of text + caret in a 32px text area: shifted 18px left.
        let img = e.image();
        assert_eq!(img.pixel(35, 3), Some(RED));
        assert_eq!(img.pixel(36, 3), Some(Color::WHITE));
        assert_eq!(img.pixel(2, 3), Some(RED));
        assert_ne!(img.pixel(1, 3), Some(RED));
    }

    #[test]
    fn full_and_text_only_renders_match() {
        let mut e = entry(EntryConfig::new().prompt("p").font(SMALL));
        e.focus(Instant::now());
        for c in "hello".chars() {
            e.push_char(c);
        }
        let text_only = e.image().clone();
        e.render_full(true);
        assert_eq!(e.image(), &text_only);

        e.blur();
        let text_only = e.image().clone();
        e.render();
        assert_eq!(e.image(), &text_only);
    }
}

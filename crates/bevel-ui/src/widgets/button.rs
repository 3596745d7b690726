use bevel_engine::coords::{Point, Rect};
use bevel_engine::paint::{BevelTones, Color};
use bevel_engine::text::Font;

use crate::coerce::{coerce_color, resolve_font, ColorSpec, FontSpec, DEFAULT_FILL, DEFAULT_TEXT, MUTED_TEXT};
use crate::error::WidgetError;
use crate::painter::BevelStyle;
use crate::widget::{SharedText, Widget, WidgetCore};

/// Zero-argument callback fired when a button goes down.
pub type Action = Box<dyn FnMut()>;

/// State transition reported by [`Button::update`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonEvent {
    Pressed,
    Released,
}

// ── configuration ─────────────────────────────────────────────────────────

/// Attribute patch for [`Button::new`] and [`Button::configure`].
///
/// Unset fields are left alone. An entirely empty patch turns `configure`
/// into a getter.
///
/// # Example
/// ```rust,ignore
/// Button::new(
///     Rect::new(10, 10, 100, 30),
///     ButtonConfig::new().text("Save").color(0x3070c0u32).on_press(|| save()),
///     fonts,
/// )?;
/// ```
#[derive(Default)]
pub struct ButtonConfig {
    pub rect: Option<Rect>,
    pub text: Option<String>,
    pub color: Option<ColorSpec>,
    pub textcolor: Option<ColorSpec>,
    pub active: Option<bool>,
    /// `Some(None)` removes the current action.
    pub action: Option<Option<Action>>,
    pub font: Option<FontSpec>,
}

impl ButtonConfig {
    pub fn new() -> Self { Self::default() }

    pub fn rect(mut self, v: impl Into<Rect>) -> Self { self.rect = Some(v.into()); self }
    pub fn text(mut self, v: impl Into<String>) -> Self { self.text = Some(v.into()); self }
    pub fn color(mut self, v: impl Into<ColorSpec>) -> Self { self.color = Some(v.into()); self }
    pub fn textcolor(mut self, v: impl Into<ColorSpec>) -> Self { self.textcolor = Some(v.into()); self }
    pub fn active(mut self, v: bool) -> Self { self.active = Some(v); self }
    pub fn font(mut self, v: impl Into<FontSpec>) -> Self { self.font = Some(v.into()); self }

    /// Callback invoked once per press.
    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.action = Some(Some(Box::new(f)));
        self
    }

    pub fn no_action(mut self) -> Self {
        self.action = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
            && self.text.is_none()
            && self.color.is_none()
            && self.textcolor.is_none()
            && self.active.is_none()
            && self.action.is_none()
            && self.font.is_none()
    }
}

/// Snapshot of a button's attributes returned by [`Button::configure`].
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSettings {
    pub rect: Rect,
    pub text: String,
    pub color: Color,
    pub textcolor: Color,
    pub active: bool,
    pub pressed: bool,
    pub has_action: bool,
    /// Explicitly chosen font; `None` means a default face sized to the
    /// rectangle height.
    pub font: Option<Font>,
}

// ── Button ────────────────────────────────────────────────────────────────

/// A bevelled push button.
///
/// The button goes down when the primary pointer button is held over it and
/// comes back up as soon as the pointer leaves or the button is released.
/// The action runs once per press, after the pressed look is rendered.
pub struct Button {
    core: WidgetCore,
    fonts: SharedText,
    color: Color,
    textcolor: Color,
    active: bool,
    pressed: bool,
    action: Option<Action>,
    font: Option<Font>,
}

impl Button {
    /// Creates a button and renders it once.
    ///
    /// `config.rect`, when set, takes precedence over `rect`.
    pub fn new(rect: Rect, config: ButtonConfig, fonts: SharedText) -> Result<Self, WidgetError> {
        let rect = config.rect.unwrap_or(rect);
        let mut button = Self {
            core: WidgetCore::new(rect, "")?,
            fonts,
            color: DEFAULT_FILL,
            textcolor: DEFAULT_TEXT,
            active: true,
            pressed: false,
            action: None,
            font: None,
        };
        button.apply(config)?;
        button.render();
        Ok(button)
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.core.text()
    }

    pub fn settings(&self) -> ButtonSettings {
        ButtonSettings {
            rect: self.core.rect(),
            text: self.core.text().to_string(),
            color: self.color,
            textcolor: self.textcolor,
            active: self.active,
            pressed: self.pressed,
            has_action: self.action.is_some(),
            font: self.font,
        }
    }

    /// Applies `patch` and re-renders once, or just reports the current
    /// settings when the patch is empty.
    ///
    /// An invalid rectangle rejects the whole patch.
    pub fn configure(&mut self, patch: ButtonConfig) -> Result<ButtonSettings, WidgetError> {
        if patch.is_empty() {
            return Ok(self.settings());
        }
        self.apply(patch)?;
        self.render();
        log::trace!("button reconfigured: {:?}", self.core.rect());
        Ok(self.settings())
    }

    fn apply(&mut self, patch: ButtonConfig) -> Result<(), WidgetError> {
        // First, so a bad rectangle rejects the patch before anything changes.
        if let Some(rect) = patch.rect {
            self.core.set_rect(rect)?;
        }
        if let Some(text) = patch.text {
            self.core.text = text;
        }
        if let Some(spec) = &patch.color {
            self.color = coerce_color(spec, DEFAULT_FILL);
        }
        if let Some(spec) = &patch.textcolor {
            self.textcolor = coerce_color(spec, DEFAULT_TEXT);
        }
        if let Some(active) = patch.active {
            self.active = active;
            if !active && self.pressed {
                log::trace!("button {:?} released by deactivation", self.core.text());
                self.pressed = false;
            }
        }
        if let Some(action) = patch.action {
            self.action = action;
        }
        if let Some(spec) = &patch.font {
            self.font = resolve_font(spec, &*self.fonts);
        }
        Ok(())
    }

    /// Advances the press state machine for one frame.
    ///
    /// `pointer` is the pointer position in surface pixels (`None` when the
    /// pointer is outside the window) and `held` whether the primary button
    /// is down. Renders only on a transition.
    pub fn update(&mut self, pointer: Option<Point>, held: bool) -> Option<ButtonEvent> {
        if !self.active {
            return None;
        }
        let inside = pointer.is_some_and(|p| self.core.rect().contains(p));

        if !self.pressed && held && inside {
            self.pressed = true;
            self.render();
            log::trace!("button {:?} pressed", self.core.text());
            if let Some(action) = &mut self.action {
                action();
            }
            Some(ButtonEvent::Pressed)
        } else if self.pressed && (!held || !inside) {
            self.pressed = false;
            self.render();
            log::trace!("button {:?} released", self.core.text());
            Some(ButtonEvent::Released)
        } else {
            None
        }
    }

    fn effective_font(&self) -> Font {
        self.font
            .unwrap_or_else(|| self.fonts.default_font(self.core.rect().h as f32))
    }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn render(&mut self) {
        let font = self.effective_font();
        let tones = BevelTones::from_base(self.color);
        let h = self.core.rect().h;
        let text = self.core.text().to_string();

        let (style, text_color, at) = if self.pressed {
            (BevelStyle::Pressed, self.textcolor, Point::new(4, h / 6 + 1))
        } else if self.active {
            (BevelStyle::Raised, self.textcolor, Point::new(3, h / 6))
        } else {
            (BevelStyle::Raised, MUTED_TEXT, Point::new(3, h / 6))
        };

        let mut p = self.core.painter(&*self.fonts);
        p.bevel(&tones, style);
        p.text(font, &text, text_color, at);
    }
}

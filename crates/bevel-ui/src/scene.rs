use std::time::Instant;

use bevel_engine::coords::{Point, Rect};
use bevel_engine::input::{InputFrame, InputState, KeyEvent, MouseButton};
use bevel_engine::raster::Image;

use crate::error::WidgetError;
use crate::focus::{EntryGroup, EntryGroupConfig};
use crate::group::{ButtonGroup, WidgetId};
use crate::widget::SharedText;
use crate::widgets::button::{Button, ButtonConfig, ButtonEvent};
use crate::widgets::entry::{Entry, EntryConfig};

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of input state for one UI frame.
///
/// Construct this from the engine's `InputState` / `InputFrame` each frame
/// with [`UiInput::from_frame`], or fill it by hand in tests and scripts.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Pointer position in surface pixels; `None` when outside the window.
    pub pointer: Option<Point>,
    /// `true` while the primary button is held down.
    pub held: bool,
    /// Where the primary button went down, for the frame in which it did.
    pub pressed: Option<Point>,
    /// Key presses this frame in arrival order.
    pub keys: Vec<KeyEvent>,
}

impl UiInput {
    pub fn from_frame(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            pointer: state.pointer_pos,
            held: state.button_down(MouseButton::PRIMARY),
            pressed: frame
                .button_pressed(MouseButton::PRIMARY)
                .then(|| frame.press_pos(MouseButton::PRIMARY))
                .flatten(),
            keys: frame.keys.clone(),
        }
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator: one button group, one entry group and the text
/// backend they share.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new(Rc::new(font_system));
/// let ok = ui.add_button(Rect::new(10, 10, 80, 24), ButtonConfig::new().text("OK"))?;
/// let name = ui.add_entry(Rect::new(10, 40, 160, 24), EntryConfig::new().prompt("Name"))?;
///
/// // Every frame:
/// ui.frame(&UiInput::from_frame(&state, &frame), clock.tick().now);
/// ui.draw(&mut surface);
/// ```
pub struct UiScene {
    pub buttons: ButtonGroup,
    pub entries: EntryGroup,
    fonts: SharedText,
}

impl UiScene {
    pub fn new(fonts: SharedText) -> Self {
        Self::with_entry_config(fonts, EntryGroupConfig::default())
    }

    pub fn with_entry_config(fonts: SharedText, config: EntryGroupConfig) -> Self {
        Self { buttons: ButtonGroup::new(), entries: EntryGroup::with_config(config), fonts }
    }

    /// Handle to the text backend widgets of this scene use.
    pub fn fonts(&self) -> SharedText {
        self.fonts.clone()
    }

    pub fn add_button(&mut self, rect: Rect, config: ButtonConfig) -> Result<WidgetId, WidgetError> {
        let button = Button::new(rect, config, self.fonts.clone())?;
        Ok(self.buttons.add(button))
    }

    pub fn add_entry(&mut self, rect: Rect, config: EntryConfig) -> Result<WidgetId, WidgetError> {
        let entry = Entry::new(rect, config, self.fonts.clone())?;
        Ok(self.entries.add(entry))
    }

    /// Applies one frame of input. Returns the button transitions.
    ///
    /// Order: pointer press → key presses → caret blink → button update.
    pub fn frame(&mut self, input: &UiInput, now: Instant) -> Vec<(WidgetId, ButtonEvent)> {
        if let Some(pos) = input.pressed {
            self.entries.mouse_pressed_at(pos, now);
        }
        for key in &input.keys {
            self.entries.key_action(key);
        }
        self.entries.tick(now);
        self.buttons.update(input.pointer, input.held)
    }

    /// Blits every button, then every entry, onto `surface`.
    pub fn draw(&self, surface: &mut Image) {
        self.buttons.draw(surface);
        self.entries.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::FixedAdvance;
    use crate::widget::Widget;
    use bevel_engine::input::{InputEvent, Key, KeyState, MouseButtonState, PointerButtonEvent};
    use bevel_engine::paint::Color;

    fn scene() -> (UiScene, WidgetId, WidgetId) {
        let mut ui = UiScene::new(FixedAdvance::shared(6));
        let b = ui.add_button(Rect::new(0, 0, 100, 30), ButtonConfig::new().text("Go")).unwrap();
        let e = ui.add_entry(Rect::new(0, 40, 100, 20), EntryConfig::new()).unwrap();
        (ui, b, e)
    }

    fn click(at: Point) -> UiInput {
        UiInput { pointer: Some(at), held: true, pressed: Some(at), keys: Vec::new() }
    }

    // ── UiInput ───────────────────────────────────────────────────────────

    #[test]
    fn input_from_engine_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                pos: Point::new(7, 9),
            }),
        );
        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::A,
                state: KeyState::Pressed,
                text: Some('a'),
                code: 0,
                repeat: false,
            },
        );

        let input = UiInput::from_frame(&state, &frame);
        assert_eq!(input.pointer, Some(Point::new(7, 9)));
        assert!(input.held);
        assert_eq!(input.pressed, Some(Point::new(7, 9)));
        assert_eq!(input.keys, vec![KeyEvent::char(Key::A, 'a')]);
    }

    #[test]
    fn press_position_survives_later_pointer_motion() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                pos: Point::new(10, 45),
            }),
        );
        state.apply_event(&mut frame, InputEvent::PointerMoved(Point::new(110, 5)));

        let input = UiInput::from_frame(&state, &frame);
        assert_eq!(input.pointer, Some(Point::new(110, 5)));
        assert_eq!(input.pressed, Some(Point::new(10, 45)));

        let (mut ui, _, e) = scene();
        ui.frame(&input, Instant::now());
        assert_eq!(ui.entries.focused(), Some(e));
    }

    #[test]
    fn no_press_without_a_button_down() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(Point::new(3, 3)));
        assert_eq!(UiInput::from_frame(&state, &frame).pressed, None);
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn click_then_type_in_the_same_frame() {
        let (mut ui, _, e) = scene();
        let mut input = click(Point::new(10, 45));
        input.keys = vec![KeyEvent::char(Key::H, 'h'), KeyEvent::char(Key::I, 'i')];
        assert!(ui.frame(&input, Instant::now()).is_empty());
        assert_eq!(ui.entries.focused(), Some(e));
        assert_eq!(ui.entries.get_text(e), Some("hi"));
    }

    #[test]
    fn button_press_and_release() {
        let (mut ui, b, _) = scene();
        let now = Instant::now();
        assert_eq!(ui.frame(&click(Point::new(50, 15)), now), vec![(b, ButtonEvent::Pressed)]);

        let hold = UiInput { pressed: None, ..click(Point::new(50, 15)) };
        assert!(ui.frame(&hold, now).is_empty());

        let up = UiInput { held: false, pressed: None, ..click(Point::new(50, 15)) };
        assert_eq!(ui.frame(&up, now), vec![(b, ButtonEvent::Released)]);
    }

    #[test]
    fn caret_blinks_across_frames() {
        let (mut ui, _, e) = scene();
        let t0 = Instant::now();
        ui.frame(&click(Point::new(10, 45)), t0);
        let rev = ui.entries.get(e).unwrap().revision();

        ui.frame(&UiInput::default(), t0 + Duration::from_millis(100));
        assert_eq!(ui.entries.get(e).unwrap().revision(), rev);
        ui.frame(&UiInput::default(), t0 + Duration::from_millis(550));
        assert_eq!(ui.entries.get(e).unwrap().revision(), rev + 1);
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_composes_all_widgets() {
        let (ui, _, _) = scene();
        let mut surface = Image::filled(120, 70, Color::BLACK);
        ui.draw(&mut surface);
        // Button face, entry face, untouched background.
        assert_eq!(surface.pixel(90, 20), Some(Color::rgb(0xf0, 0xf0, 0xf0)));
        assert_eq!(surface.pixel(90, 50), Some(Color::WHITE));
        assert_eq!(surface.pixel(110, 65), Some(Color::BLACK));
    }
}

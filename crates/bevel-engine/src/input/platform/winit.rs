use ::winit::dpi::PhysicalPosition;
use ::winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use ::winit::keyboard::{KeyCode, PhysicalKey};

use crate::coords::Point;
use crate::input::{InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent};

/// Translates a winit `WindowEvent` into engine `InputEvent`s.
///
/// `scale_factor` is the window's current DPI scale; positions are converted
/// to logical pixels and floored onto the integer surface grid.
///
/// Most events map to exactly one `InputEvent`. A key press whose text
/// commits several characters (a dead key followed by a letter, an IME
/// commit) yields one press per character. Events not represented by the
/// input subsystem yield nothing.
pub fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Vec<InputEvent> {
    match event {
        WindowEvent::Focused(f) => vec![InputEvent::Focused(*f)],

        WindowEvent::CursorLeft { .. } => vec![InputEvent::PointerLeft],

        WindowEvent::CursorMoved { position, .. } => {
            vec![InputEvent::PointerMoved(to_logical_point(scale_factor, *position))]
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };

            // winit 0.30 does not expose cursor query; use tracked pointer position.
            let pos = state.pointer_pos.unwrap_or_default();

            vec![InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: st,
                pos,
            })]
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            let (key, code) = map_key(event.physical_key);
            key_events(key, code, st, event.text.as_deref(), event.repeat)
        }

        _ => Vec::new(),
    }
}

/// Key events for one physical key transition.
///
/// Releases never carry text. A press carries its first printable character;
/// every further printable character becomes another press of the same key.
fn key_events(key: Key, code: u32, state: KeyState, text: Option<&str>, repeat: bool) -> Vec<InputEvent> {
    let chars: Vec<char> = match state {
        KeyState::Pressed => text.map(printable_chars).unwrap_or_default(),
        KeyState::Released => Vec::new(),
    };
    let event = |text: Option<char>| InputEvent::Key { key, state, text, code, repeat };

    if chars.is_empty() {
        return vec![event(None)];
    }
    chars.into_iter().map(|c| event(Some(c))).collect()
}

fn to_logical_point(scale_factor: f64, pos: PhysicalPosition<f64>) -> Point {
    let logical = pos.to_logical::<f64>(scale_factor);
    Point::new(logical.x.floor() as i32, logical.y.floor() as i32)
}

/// Characters of a key's text, minus control characters.
///
/// winit reports Backspace as `"\u{8}"`, Enter as `"\r"` and so on; those are
/// commands, not text.
fn printable_chars(text: &str) -> Vec<char> {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Space => Key::Space,
                KeyCode::Backslash => Key::Backslash,

                KeyCode::Insert => Key::Insert,
                KeyCode::Delete => Key::Delete,
                KeyCode::Home => Key::Home,
                KeyCode::End => Key::End,
                KeyCode::PageUp => Key::PageUp,
                KeyCode::PageDown => Key::PageDown,

                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,

                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
                KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

                KeyCode::KeyA => Key::A,
                KeyCode::KeyB => Key::B,
                KeyCode::KeyC => Key::C,
                KeyCode::KeyD => Key::D,
                KeyCode::KeyE => Key::E,
                KeyCode::KeyF => Key::F,
                KeyCode::KeyG => Key::G,
                KeyCode::KeyH => Key::H,
                KeyCode::KeyI => Key::I,
                KeyCode::KeyJ => Key::J,
                KeyCode::KeyK => Key::K,
                KeyCode::KeyL => Key::L,
                KeyCode::KeyM => Key::M,
                KeyCode::KeyN => Key::N,
                KeyCode::KeyO => Key::O,
                KeyCode::KeyP => Key::P,
                KeyCode::KeyQ => Key::Q,
                KeyCode::KeyR => Key::R,
                KeyCode::KeyS => Key::S,
                KeyCode::KeyT => Key::T,
                KeyCode::KeyU => Key::U,
                KeyCode::KeyV => Key::V,
                KeyCode::KeyW => Key::W,
                KeyCode::KeyX => Key::X,
                KeyCode::KeyY => Key::Y,
                KeyCode::KeyZ => Key::Z,

                KeyCode::Digit0 => Key::Digit0,
                KeyCode::Digit1 => Key::Digit1,
                KeyCode::Digit2 => Key::Digit2,
                KeyCode::Digit3 => Key::Digit3,
                KeyCode::Digit4 => Key::Digit4,
                KeyCode::Digit5 => Key::Digit5,
                KeyCode::Digit6 => Key::Digit6,
                KeyCode::Digit7 => Key::Digit7,
                KeyCode::Digit8 => Key::Digit8,
                KeyCode::Digit9 => Key::Digit9,

                KeyCode::F1 => Key::F1,
                KeyCode::F2 => Key::F2,
                KeyCode::F3 => Key::F3,
                KeyCode::F4 => Key::F4,
                KeyCode::F5 => Key::F5,
                KeyCode::F6 => Key::F6,
                KeyCode::F7 => Key::F7,
                KeyCode::F8 => Key::F8,
                KeyCode::F9 => Key::F9,
                KeyCode::F10 => Key::F10,
                KeyCode::F11 => Key::F11,
                KeyCode::F12 => Key::F12,

                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}

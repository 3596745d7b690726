use std::fmt;

use crate::coords::Point;

/// Keyboard key identifier.
///
/// The runtime should map platform scancodes/keycodes into these variants where possible.
/// For unsupported keys, use `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    Backslash,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers as keys (useful for focus/navigation policies)
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// The button that presses widgets and focuses entries.
    pub const PRIMARY: MouseButton = MouseButton::Left;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// A key press together with the character it produced, if any.
///
/// This is what text entries consume: `key` selects editing commands
/// (delete, escape), `text` is appended for everything else.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    /// Printable character produced by the press. Control characters are
    /// filtered out by the platform layer.
    pub text: Option<char>,
}

impl KeyEvent {
    #[inline]
    pub const fn new(key: Key, text: Option<char>) -> Self {
        Self { key, text }
    }

    /// A key press that produced `c`.
    #[inline]
    pub const fn char(key: Key, c: char) -> Self {
        Self { key, text: Some(c) }
    }

    /// A key press that produced no text (Escape, Backspace, Shift, …).
    #[inline]
    pub const fn named(key: Key) -> Self {
        Self { key, text: None }
    }
}

/// Pointer button event.
///
/// The position is included so event processing does not depend on an
/// externally tracked pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub pos: Point,
}

/// Platform-agnostic input events emitted by the platform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Printable character produced by a press.
        text: Option<char>,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(Point),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
use std::collections::HashSet;

use crate::coords::Point;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyEvent,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in surface pixels.
    pub pointer_pos: Option<Point>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets so nothing stays stuck.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(p) => {
                self.pointer_pos = Some(*p);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, text, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                    // Repeats still type, so every press is forwarded.
                    frame.keys.push(KeyEvent::new(*key, *text));
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos }) => {
                self.pointer_pos = Some(*pos);

                match state {
                    MouseButtonState::Pressed => {
                        let inserted = self.buttons_down.insert(*button);
                        if inserted {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        let removed = self.buttons_down.remove(button);
                        if removed {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

use std::collections::HashSet;

use crate::coords::Point;

use super::types::{InputEvent, KeyEvent, MouseButton, MouseButtonState, PointerButtonEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held buttons, pointer position).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Key presses (including repeats) in arrival order.
    pub keys: Vec<KeyEvent>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// True if `button` went down at least once this frame.
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Where `button` first went down this frame.
    pub fn press_pos(&self, button: MouseButton) -> Option<Point> {
        self.events.iter().find_map(|ev| match ev {
            InputEvent::PointerButton(PointerButtonEvent {
                button: b,
                state: MouseButtonState::Pressed,
                pos,
            }) if *b == button => Some(*pos),
            _ => None,
        })
    }
}

use std::collections::HashSet;

/// DOM `keyCode` values the table reacts to.
pub mod keys {
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const R: u32 = 82;
}

/// DOM `MouseEvent.button` values.
pub mod buttons {
    pub const LEFT: u32 = 0;
    pub const MIDDLE: u32 = 1;
    pub const RIGHT: u32 = 2;
}

/// `kind` values for [`InputEvent::Custom`] sent by the UI layer.
pub mod custom {
    /// `a` carries the new strike power in `[0, 1]`.
    pub const SET_STRIKE_POWER: u32 = 1;
    /// Reset camera and balls.
    pub const RESET: u32 = 2;
    /// Reset balls only.
    pub const RESET_BALLS: u32 = 3;
    /// Strike along the camera ray, same as a left click.
    pub const STRIKE: u32 = 4;
}

/// Input event types the table understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed at canvas pixel coordinates (x, y).
    PointerDown { button: u32, x: f32, y: f32 },
    /// A mouse button was released at canvas pixel coordinates (x, y).
    PointerUp { button: u32, x: f32, y: f32 },
    /// The cursor moved to canvas pixel coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer (sliders, buttons).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the table drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys and mouse buttons currently held down.
#[derive(Debug, Clone, Default)]
pub struct ButtonStates {
    keys: HashSet<u32>,
    buttons: HashSet<u32>,
}

impl ButtonStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track press/release events. Other events are ignored.
    pub fn record(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.keys.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.keys.remove(&key_code);
            }
            InputEvent::PointerDown { button, .. } => {
                self.buttons.insert(button);
            }
            InputEvent::PointerUp { button, .. } => {
                self.buttons.remove(&button);
            }
            _ => {}
        }
    }

    pub fn is_key_held(&self, key_code: u32) -> bool {
        self.keys.contains(&key_code)
    }

    pub fn is_button_held(&self, button: u32) -> bool {
        self.buttons.contains(&button)
    }

    /// +1 when only `positive` is held, -1 when only `negative` is held, else 0.
    pub fn axis(&self, positive: u32, negative: u32) -> f32 {
        let mut value = 0.0;
        if self.is_key_held(positive) {
            value += 1.0;
        }
        if self.is_key_held(negative) {
            value -= 1.0;
        }
        value
    }

    /// Release everything, e.g. when the canvas loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { button: buttons::LEFT, x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: keys::R });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: custom::SET_STRIKE_POWER, a: 0.75, b: 0.0, c: 0.0 });
        let events = q.drain();
        match events[0] {
            InputEvent::Custom { kind, a, .. } => {
                assert_eq!(kind, custom::SET_STRIKE_POWER);
                assert_eq!(a, 0.75);
            }
            _ => panic!("Expected Custom event"),
        }
    }

    #[test]
    fn held_keys_follow_press_and_release() {
        let mut held = ButtonStates::new();
        held.record(&InputEvent::KeyDown { key_code: keys::ARROW_UP });
        assert!(held.is_key_held(keys::ARROW_UP));
        held.record(&InputEvent::KeyUp { key_code: keys::ARROW_UP });
        assert!(!held.is_key_held(keys::ARROW_UP));
    }

    #[test]
    fn held_buttons_follow_pointer_events() {
        let mut held = ButtonStates::new();
        held.record(&InputEvent::PointerDown { button: buttons::RIGHT, x: 0.0, y: 0.0 });
        held.record(&InputEvent::PointerMove { x: 5.0, y: 5.0 });
        assert!(held.is_button_held(buttons::RIGHT));
        assert!(!held.is_button_held(buttons::LEFT));
        held.record(&InputEvent::PointerUp { button: buttons::RIGHT, x: 5.0, y: 5.0 });
        assert!(!held.is_button_held(buttons::RIGHT));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut held = ButtonStates::new();
        held.record(&InputEvent::KeyDown { key_code: keys::ARROW_UP });
        assert_eq!(held.axis(keys::ARROW_UP, keys::ARROW_DOWN), 1.0);
        held.record(&InputEvent::KeyDown { key_code: keys::ARROW_DOWN });
        assert_eq!(held.axis(keys::ARROW_UP, keys::ARROW_DOWN), 0.0);
        held.clear();
        assert_eq!(held.axis(keys::ARROW_UP, keys::ARROW_DOWN), 0.0);
    }
}

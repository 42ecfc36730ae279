//! Per-device input state
//!
//! Plain value types describing what one device looked like at one instant.
//! [`InputSnapshot`](super::InputSnapshot) keeps a current and a previous copy
//! of each per player slot; an [`InputSource`] produces fresh readings.

use super::PlayerIndex;
use bitflags::bitflags;
use sdl2::keyboard::Keycode;
use std::collections::HashSet;

/// Stick deflection at which a left-stick direction counts as a pressed button
const THUMBSTICK_THRESHOLD: f32 = 0.5;

bitflags! {
    /// Gamepad buttons
    ///
    /// Left-stick directions are reported as buttons too, so menus can bind
    /// "stick up" the same way they bind the d-pad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const BACK = 1 << 4;
        const START = 1 << 5;
        const LEFT_SHOULDER = 1 << 6;
        const RIGHT_SHOULDER = 1 << 7;
        const LEFT_STICK = 1 << 8;
        const RIGHT_STICK = 1 << 9;
        const DPAD_UP = 1 << 10;
        const DPAD_DOWN = 1 << 11;
        const DPAD_LEFT = 1 << 12;
        const DPAD_RIGHT = 1 << 13;
        const LEFT_THUMBSTICK_UP = 1 << 14;
        const LEFT_THUMBSTICK_DOWN = 1 << 15;
        const LEFT_THUMBSTICK_LEFT = 1 << 16;
        const LEFT_THUMBSTICK_RIGHT = 1 << 17;
    }
}

bitflags! {
    /// Mouse buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
        const X1 = 1 << 3;
        const X2 = 1 << 4;
    }
}

/// Set of keys held down
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardState {
    pressed: HashSet<Keycode>,
}

impl KeyboardState {
    pub fn new(keys: impl IntoIterator<Item = Keycode>) -> Self {
        KeyboardState {
            pressed: keys.into_iter().collect(),
        }
    }

    pub fn is_key_down(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_key_up(&self, key: Keycode) -> bool {
        !self.is_key_down(key)
    }
}

/// Gamepad reading
///
/// Stick vectors use a y-up convention: pushing the stick forward gives a
/// positive y. A disconnected pad reads as the default (nothing pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamePadState {
    pub connected: bool,
    pub buttons: Buttons,
    pub left_stick: (f32, f32),
    pub right_stick: (f32, f32),
    pub left_trigger: f32,
    pub right_trigger: f32,
}

impl GamePadState {
    /// Builds a connected pad reading, deriving the left-thumbstick buttons
    /// from the left stick.
    pub fn new(
        left_stick: (f32, f32),
        right_stick: (f32, f32),
        left_trigger: f32,
        right_trigger: f32,
        buttons: Buttons,
    ) -> Self {
        GamePadState {
            connected: true,
            buttons: buttons | thumbstick_buttons(left_stick),
            left_stick,
            right_stick,
            left_trigger,
            right_trigger,
        }
    }

    pub fn is_button_down(&self, button: Buttons) -> bool {
        self.buttons.contains(button)
    }

    pub fn is_button_up(&self, button: Buttons) -> bool {
        !self.is_button_down(button)
    }
}

fn thumbstick_buttons(stick: (f32, f32)) -> Buttons {
    let mut buttons = Buttons::empty();
    if stick.1 > THUMBSTICK_THRESHOLD {
        buttons |= Buttons::LEFT_THUMBSTICK_UP;
    }
    if stick.1 < -THUMBSTICK_THRESHOLD {
        buttons |= Buttons::LEFT_THUMBSTICK_DOWN;
    }
    if stick.0 < -THUMBSTICK_THRESHOLD {
        buttons |= Buttons::LEFT_THUMBSTICK_LEFT;
    }
    if stick.0 > THUMBSTICK_THRESHOLD {
        buttons |= Buttons::LEFT_THUMBSTICK_RIGHT;
    }
    buttons
}

/// Mouse position (window pixels) and held buttons
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: MouseButtons,
}

impl MouseState {
    pub fn is_button_down(&self, button: MouseButtons) -> bool {
        self.buttons.contains(button)
    }
}

/// Touch contact phase within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Pressed,
    Moved,
    Released,
}

/// One touch contact, in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i64,
    pub x: f32,
    pub y: f32,
    pub phase: TouchPhase,
}

/// Source of raw device readings
///
/// Implemented by the SDL2 backend and by scripted fakes in tests. Readings
/// are queried once per frame by `InputSnapshot::refresh`.
pub trait InputSource {
    fn keyboard(&self, player: PlayerIndex) -> KeyboardState;

    fn gamepad(&self, player: PlayerIndex) -> GamePadState;

    fn mouse(&self, player: PlayerIndex) -> MouseState;

    /// Touch contacts gathered since the last call
    fn take_touches(&mut self) -> Vec<TouchPoint>;

    /// Moves the OS pointer so it follows a stick-driven cursor
    fn set_mouse_position(&mut self, x: i32, y: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_state() {
        let keyboard = KeyboardState::new([Keycode::Up, Keycode::Space]);
        assert!(keyboard.is_key_down(Keycode::Up));
        assert!(keyboard.is_key_up(Keycode::Down));
    }

    #[test]
    fn test_disconnected_pad_reads_nothing() {
        let pad = GamePadState::default();
        assert!(!pad.connected);
        assert!(pad.is_button_up(Buttons::A));
    }

    #[test]
    fn test_thumbstick_buttons_derived_from_stick() {
        let pad = GamePadState::new((0.0, 0.9), (0.0, 0.0), 0.0, 0.0, Buttons::A);

        assert!(pad.is_button_down(Buttons::A));
        assert!(pad.is_button_down(Buttons::LEFT_THUMBSTICK_UP));
        assert!(pad.is_button_up(Buttons::LEFT_THUMBSTICK_DOWN));
    }

    #[test]
    fn test_small_stick_deflection_is_not_a_press() {
        let pad = GamePadState::new((0.3, -0.4), (0.0, 0.0), 0.0, 0.0, Buttons::empty());
        assert!(pad.buttons.is_empty());
    }

    #[test]
    fn test_mouse_buttons() {
        let mouse = MouseState {
            x: 5,
            y: 6,
            buttons: MouseButtons::LEFT | MouseButtons::X2,
        };
        assert!(mouse.is_button_down(MouseButtons::LEFT));
        assert!(!mouse.is_button_down(MouseButtons::RIGHT));
    }
}

//! Debounced input bindings
//!
//! An [`InputAction`] names a logical trigger ("menu up", "select") and binds
//! it to any number of gamepad buttons, keys and mouse buttons. Evaluating it
//! is a pure read of the [`InputSnapshot`].

use super::devices::{Buttons, MouseButtons};
use super::snapshot::InputSnapshot;
use super::PlayerIndex;
use sdl2::keyboard::Keycode;

/// A logical trigger bound across device classes
#[derive(Debug, Clone, PartialEq)]
pub struct InputAction {
    buttons: Buttons,
    keys: Vec<Keycode>,
    mouse_buttons: MouseButtons,
    new_press_only: bool,
}

impl InputAction {
    /// Creates an action bound to gamepad `buttons` and keyboard `keys`.
    ///
    /// With `new_press_only` the action fires only on the frame a binding goes
    /// down; otherwise it fires every frame a binding is held.
    pub fn new(buttons: Buttons, keys: &[Keycode], new_press_only: bool) -> Self {
        InputAction {
            buttons,
            keys: keys.to_vec(),
            mouse_buttons: MouseButtons::empty(),
            new_press_only,
        }
    }

    /// Adds mouse button bindings
    pub fn with_mouse_buttons(mut self, mouse_buttons: MouseButtons) -> Self {
        self.mouse_buttons |= mouse_buttons;
        self
    }

    pub fn new_press_only(&self) -> bool {
        self.new_press_only
    }

    /// Checks whether the action fired this frame
    ///
    /// Bindings are tried in order: gamepad buttons, then keys, then mouse
    /// buttons. With a controlling player only that slot is checked. With
    /// `None` the first slot that pressed the binding is returned.
    pub fn evaluate(
        &self,
        snapshot: &InputSnapshot,
        controlling: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        let pressed_button = self.buttons.iter().find_map(|button| {
            if self.new_press_only {
                snapshot.new_button_press(button, controlling)
            } else {
                snapshot.button_down(button, controlling)
            }
        });

        pressed_button
            .or_else(|| {
                self.keys.iter().find_map(|&key| {
                    if self.new_press_only {
                        snapshot.new_key_press(key, controlling)
                    } else {
                        snapshot.key_down(key, controlling)
                    }
                })
            })
            .or_else(|| {
                self.mouse_buttons.iter().find_map(|button| {
                    if self.new_press_only {
                        snapshot.new_mouse_button_press(button, controlling)
                    } else {
                        snapshot.mouse_button_down(button, controlling)
                    }
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::snapshot::testing::FakeInput;
    use crate::input::devices::GamePadState;
    use crate::render::Viewport;
    use proptest::prelude::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn menu_up() -> InputAction {
        InputAction::new(
            Buttons::DPAD_UP | Buttons::LEFT_THUMBSTICK_UP,
            &[Keycode::Up],
            true,
        )
    }

    fn pad(buttons: Buttons) -> GamePadState {
        GamePadState::new((0.0, 0.0), (0.0, 0.0), 0.0, 0.0, buttons)
    }

    #[test]
    fn test_edge_triggered_fires_once() {
        let action = menu_up();
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        input.press(Keycode::Up);
        snapshot.refresh(&mut input, FRAME);
        assert_eq!(action.evaluate(&snapshot, None), Some(PlayerIndex::One));

        snapshot.refresh(&mut input, FRAME);
        assert_eq!(action.evaluate(&snapshot, None), None);
    }

    #[test]
    fn test_level_triggered_fires_while_held() {
        let action = InputAction::new(Buttons::empty(), &[Keycode::Up], false);
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        input.press(Keycode::Up);
        for _ in 0..3 {
            snapshot.refresh(&mut input, FRAME);
            assert!(action.evaluate(&snapshot, None).is_some());
        }
    }

    #[test]
    fn test_any_binding_in_any_class_fires() {
        let action = menu_up();
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        input.gamepads[1] = pad(Buttons::DPAD_UP);
        snapshot.refresh(&mut input, FRAME);

        assert_eq!(action.evaluate(&snapshot, None), Some(PlayerIndex::Two));
        assert_eq!(action.evaluate(&snapshot, Some(PlayerIndex::One)), None);
        assert_eq!(
            action.evaluate(&snapshot, Some(PlayerIndex::Two)),
            Some(PlayerIndex::Two)
        );
    }

    #[test]
    fn test_thumbstick_binding() {
        let action = menu_up();
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        input.gamepads[0] = GamePadState::new((0.0, 0.8), (0.0, 0.0), 0.0, 0.0, Buttons::empty());
        snapshot.refresh(&mut input, FRAME);

        assert_eq!(action.evaluate(&snapshot, None), Some(PlayerIndex::One));
    }

    #[test]
    fn test_mouse_binding() {
        let action = InputAction::new(Buttons::A, &[Keycode::Return], true)
            .with_mouse_buttons(MouseButtons::LEFT);
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        input.mouse.buttons = MouseButtons::RIGHT;
        snapshot.refresh(&mut input, FRAME);
        assert_eq!(action.evaluate(&snapshot, None), None);

        input.mouse.buttons = MouseButtons::RIGHT | MouseButtons::LEFT;
        snapshot.refresh(&mut input, FRAME);
        assert_eq!(action.evaluate(&snapshot, None), Some(PlayerIndex::One));
    }

    #[test]
    fn test_buttons_are_tried_before_keys() {
        let action = menu_up();
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        // The keyboard is mirrored into every slot, the pad is only player three's
        input.press(Keycode::Up);
        input.gamepads[2] = pad(Buttons::DPAD_UP);
        snapshot.refresh(&mut input, FRAME);

        assert_eq!(action.evaluate(&snapshot, None), Some(PlayerIndex::Three));
        assert_eq!(
            action.evaluate(&snapshot, Some(PlayerIndex::One)),
            Some(PlayerIndex::One)
        );
    }

    #[test]
    fn test_unbound_input_does_not_fire() {
        let action = menu_up();
        let mut input = FakeInput::new();
        let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));

        input.press(Keycode::Down);
        input.gamepads[0] = pad(Buttons::A);
        snapshot.refresh(&mut input, FRAME);

        assert_eq!(action.evaluate(&snapshot, None), None);
    }

    proptest! {
        #[test]
        fn test_edge_fires_only_on_transitions(
            presses in proptest::collection::vec(any::<bool>(), 1..40)
        ) {
            let action = InputAction::new(Buttons::empty(), &[Keycode::Space], true);
            let mut input = FakeInput::new();
            let mut snapshot = InputSnapshot::new(Viewport::new(800, 480));
            let mut was_down = false;

            for down in presses {
                if down {
                    input.press(Keycode::Space);
                } else {
                    input.release(Keycode::Space);
                }
                snapshot.refresh(&mut input, FRAME);

                let fired = action.evaluate(&snapshot, None).is_some();
                prop_assert_eq!(fired, down && !was_down);
                was_down = down;
            }
        }
    }
}

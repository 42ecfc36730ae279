//! Per-frame input capture
//!
//! [`InputSnapshot`] holds the current and previous reading of every device
//! for every player slot. `refresh` is called exactly once per frame, before
//! any screen looks at input, and shifts current into previous for all slots
//! at once.

use super::devices::{
    Buttons, GamePadState, InputSource, KeyboardState, MouseButtons, MouseState, TouchPoint,
};
use super::{candidate_players, PlayerIndex, MAX_INPUTS};
use crate::render::Viewport;
use sdl2::keyboard::Keycode;

/// Cursor speed when driven by gamepad one's left stick, in pixels per second
const CURSOR_SPEED: f32 = 300.0;

/// Captured state of all input devices, this frame and last frame
pub struct InputSnapshot {
    current_keyboard: [KeyboardState; MAX_INPUTS],
    current_gamepad: [GamePadState; MAX_INPUTS],
    current_mouse: [MouseState; MAX_INPUTS],

    last_keyboard: [KeyboardState; MAX_INPUTS],
    last_gamepad: [GamePadState; MAX_INPUTS],
    last_mouse: [MouseState; MAX_INPUTS],

    /// Latched once a pad has been seen, so unplugging can be detected
    gamepad_was_connected: [bool; MAX_INPUTS],

    touches: Vec<TouchPoint>,

    virtual_stick: bool,
    current_virtual: GamePadState,
    last_virtual: GamePadState,

    cursor: (f32, f32),
    cursor_valid: bool,
    cursor_visible: bool,
    cursor_moved: bool,

    viewport: Viewport,
}

impl InputSnapshot {
    pub fn new(viewport: Viewport) -> Self {
        InputSnapshot {
            current_keyboard: Default::default(),
            current_gamepad: Default::default(),
            current_mouse: Default::default(),
            last_keyboard: Default::default(),
            last_gamepad: Default::default(),
            last_mouse: Default::default(),
            gamepad_was_connected: [false; MAX_INPUTS],
            touches: Vec::new(),
            virtual_stick: false,
            current_virtual: GamePadState::default(),
            last_virtual: GamePadState::default(),
            cursor: (0.0, 0.0),
            cursor_valid: false,
            cursor_visible: false,
            cursor_moved: false,
            viewport,
        }
    }

    /// Reads fresh device state, shifting current → previous first
    ///
    /// `elapsed` is the frame time in seconds; it scales stick-driven cursor
    /// movement.
    pub fn refresh(&mut self, source: &mut dyn InputSource, elapsed: f32) {
        for player in PlayerIndex::ALL {
            let i = player.index();

            self.last_keyboard[i] =
                std::mem::replace(&mut self.current_keyboard[i], source.keyboard(player));
            self.last_gamepad[i] = self.current_gamepad[i];
            self.current_gamepad[i] = source.gamepad(player);
            self.last_mouse[i] = self.current_mouse[i];
            self.current_mouse[i] = source.mouse(player);

            if self.current_gamepad[i].connected && !self.gamepad_was_connected[i] {
                log::debug!("Gamepad connected for player {:?}", player);
                self.gamepad_was_connected[i] = true;
            }
        }

        self.touches = source.take_touches();

        if self.virtual_stick {
            self.last_virtual = self.current_virtual;
            self.current_virtual = if self.current_gamepad[0].connected {
                self.current_gamepad[0]
            } else {
                self.keyboard_virtual_stick()
            };
        }

        self.update_cursor(source, elapsed);
    }

    fn update_cursor(&mut self, source: &mut dyn InputSource, elapsed: f32) {
        let old_cursor = self.cursor;
        let pad = &self.current_gamepad[0];
        let mouse = &self.current_mouse[0];

        if pad.connected && pad.left_stick != (0.0, 0.0) {
            // Stick is y-up, screen is y-down
            self.cursor.0 += pad.left_stick.0 * CURSOR_SPEED * elapsed;
            self.cursor.1 -= pad.left_stick.1 * CURSOR_SPEED * elapsed;
            source.set_mouse_position(self.cursor.0 as i32, self.cursor.1 as i32);
        } else {
            self.cursor = (mouse.x as f32, mouse.y as f32);
        }

        self.cursor.0 = self.cursor.0.clamp(0.0, self.viewport.width as f32);
        self.cursor.1 = self.cursor.1.clamp(0.0, self.viewport.height as f32);

        // Validity from the previous frame gates the moved flag
        self.cursor_moved = self.cursor_valid && old_cursor != self.cursor;
        self.cursor_valid = self.viewport.contains(mouse.x as f32, mouse.y as f32);
    }

    /// Synthesises a gamepad reading from W/A/S/D, Space and LeftCtrl
    fn keyboard_virtual_stick(&self) -> GamePadState {
        let keyboard = &self.current_keyboard[0];
        let mut stick = (0.0f32, 0.0f32);
        let mut buttons = Buttons::empty();

        if keyboard.is_key_down(Keycode::A) {
            stick.0 -= 1.0;
        }
        if keyboard.is_key_down(Keycode::S) {
            stick.1 -= 1.0;
        }
        if keyboard.is_key_down(Keycode::D) {
            stick.0 += 1.0;
        }
        if keyboard.is_key_down(Keycode::W) {
            stick.1 += 1.0;
        }
        if keyboard.is_key_down(Keycode::Space) {
            buttons |= Buttons::A;
        }
        if keyboard.is_key_down(Keycode::LCtrl) {
            buttons |= Buttons::B;
        }

        let length = (stick.0 * stick.0 + stick.1 * stick.1).sqrt();
        if length > 0.0 {
            stick = (stick.0 / length, stick.1 / length);
        }

        GamePadState::new(stick, (0.0, 0.0), 0.0, 0.0, buttons)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_virtual_stick(&mut self, enabled: bool) {
        self.virtual_stick = enabled;
    }

    pub fn virtual_state(&self) -> &GamePadState {
        &self.current_virtual
    }

    pub fn is_new_virtual_button_press(&self, button: Buttons) -> bool {
        self.current_virtual.is_button_down(button) && self.last_virtual.is_button_up(button)
    }

    // === Per-slot edge/level primitives ===

    pub fn is_key_down(&self, key: Keycode, player: PlayerIndex) -> bool {
        self.current_keyboard[player.index()].is_key_down(key)
    }

    /// Key went down this frame (down now, up last frame)
    pub fn is_new_key_press(&self, key: Keycode, player: PlayerIndex) -> bool {
        let i = player.index();
        self.current_keyboard[i].is_key_down(key) && self.last_keyboard[i].is_key_up(key)
    }

    /// Key went up this frame, on player one's keyboard
    pub fn is_new_key_release(&self, key: Keycode) -> bool {
        self.last_keyboard[0].is_key_down(key) && self.current_keyboard[0].is_key_up(key)
    }

    pub fn is_button_down(&self, button: Buttons, player: PlayerIndex) -> bool {
        self.current_gamepad[player.index()].is_button_down(button)
    }

    pub fn is_new_button_press(&self, button: Buttons, player: PlayerIndex) -> bool {
        let i = player.index();
        self.current_gamepad[i].is_button_down(button) && self.last_gamepad[i].is_button_up(button)
    }

    pub fn is_mouse_button_down(&self, button: MouseButtons, player: PlayerIndex) -> bool {
        self.current_mouse[player.index()].is_button_down(button)
    }

    pub fn is_new_mouse_button_press(&self, button: MouseButtons, player: PlayerIndex) -> bool {
        let i = player.index();
        self.current_mouse[i].is_button_down(button) && !self.last_mouse[i].is_button_down(button)
    }

    // === Player-selecting queries ===
    //
    // `None` checks every slot in order; the first slot that matches is returned.

    pub fn key_down(&self, key: Keycode, controlling: Option<PlayerIndex>) -> Option<PlayerIndex> {
        candidate_players(controlling).find(|&p| self.is_key_down(key, p))
    }

    pub fn new_key_press(
        &self,
        key: Keycode,
        controlling: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        candidate_players(controlling).find(|&p| self.is_new_key_press(key, p))
    }

    pub fn button_down(
        &self,
        button: Buttons,
        controlling: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        candidate_players(controlling).find(|&p| self.is_button_down(button, p))
    }

    pub fn new_button_press(
        &self,
        button: Buttons,
        controlling: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        candidate_players(controlling).find(|&p| self.is_new_button_press(button, p))
    }

    pub fn mouse_button_down(
        &self,
        button: MouseButtons,
        controlling: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        candidate_players(controlling).find(|&p| self.is_mouse_button_down(button, p))
    }

    pub fn new_mouse_button_press(
        &self,
        button: MouseButtons,
        controlling: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        candidate_players(controlling).find(|&p| self.is_new_mouse_button_press(button, p))
    }

    // === Raw state access ===

    pub fn keyboard(&self, player: PlayerIndex) -> (&KeyboardState, &KeyboardState) {
        let i = player.index();
        (&self.current_keyboard[i], &self.last_keyboard[i])
    }

    pub fn gamepad(&self, player: PlayerIndex) -> (&GamePadState, &GamePadState) {
        let i = player.index();
        (&self.current_gamepad[i], &self.last_gamepad[i])
    }

    pub fn mouse(&self, player: PlayerIndex) -> (&MouseState, &MouseState) {
        let i = player.index();
        (&self.current_mouse[i], &self.last_mouse[i])
    }

    pub fn gamepad_was_connected(&self, player: PlayerIndex) -> bool {
        self.gamepad_was_connected[player.index()]
    }

    /// Touch contacts reported during the last refresh
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    // === Cursor ===

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Whether the mouse was inside the viewport at the last refresh
    pub fn cursor_is_valid(&self) -> bool {
        self.cursor_valid
    }

    pub fn cursor_moved(&self) -> bool {
        self.cursor_moved
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    pub fn show_cursor(&self) -> bool {
        self.cursor_visible && self.cursor_valid
    }
}

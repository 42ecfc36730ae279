//! Gameplay Screen
//!
//! Stands in for the game: a marker circling the middle of the window.
//! The virtual stick (W/A/S/D or player one's pad) steers the orbit and its
//! A button reverses it. Escape or Start opens the pause menu, as does
//! unplugging the controlling player's gamepad. While covered the game
//! freezes and darkens.

use super::PauseMenuScreen;
use crate::input::{Buttons, InputAction, InputSnapshot, PlayerIndex};
use crate::render::{with_alpha, Renderer};
use crate::screen::{Screen, ScreenBase, ScreenContext};
use crate::settings::AppSettings;
use crate::shape::square_around;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;

/// Pause darkening step per frame
const PAUSE_FADE_STEP: f32 = 1.0 / 32.0;

/// Marker orbit speed, radians per second
const MARKER_SPEED: f32 = 1.5;

/// How fast the stick moves the orbit, pixels per second at scale 1.0
const STEER_SPEED: f32 = 240.0;

/// Furthest the orbit centre may be steered from the window centre
const STEER_RANGE: f32 = 160.0;

const BACKGROUND_COLOR: Color = Color::RGB(100, 149, 237);

pub struct GameplayScreen {
    base: ScreenBase,
    pause_action: InputAction,
    /// 0.0 running .. 1.0 fully darkened by a covering screen
    pause_alpha: f32,
    marker_angle: f32,
    /// 1.0 counter-clockwise in screen space, -1.0 the other way
    orbit_direction: f32,
    /// Orbit centre relative to the window centre, unscaled
    orbit_offset: (f32, f32),
    /// Virtual stick reading from the last handled input
    steer: (f32, f32),
    scale: f32,
}

impl GameplayScreen {
    pub fn new(settings: &AppSettings) -> Self {
        GameplayScreen {
            base: ScreenBase::new(1.5, 0.5),
            pause_action: InputAction::new(Buttons::START, &[Keycode::Escape], true),
            pause_alpha: 0.0,
            marker_angle: 0.0,
            orbit_direction: 1.0,
            orbit_offset: (0.0, 0.0),
            steer: (0.0, 0.0),
            scale: settings.resolution.scale(),
        }
    }

    #[cfg(test)]
    pub fn pause_alpha(&self) -> f32 {
        self.pause_alpha
    }

    #[cfg(test)]
    pub fn marker_angle(&self) -> f32 {
        self.marker_angle
    }

    #[cfg(test)]
    pub fn orbit_offset(&self) -> (f32, f32) {
        self.orbit_offset
    }
}

impl Screen for GameplayScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "gameplay"
    }

    fn update(
        &mut self,
        _ctx: &mut ScreenContext,
        elapsed: f32,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        // The pause menu is a popup; track covering ourselves instead of
        // transitioning off
        self.base.update(elapsed, other_screen_has_focus, false);

        self.pause_alpha = if covered_by_other_screen || other_screen_has_focus {
            (self.pause_alpha + PAUSE_FADE_STEP).min(1.0)
        } else {
            (self.pause_alpha - PAUSE_FADE_STEP).max(0.0)
        };

        if self.base.is_active() {
            self.marker_angle += self.orbit_direction * MARKER_SPEED * elapsed;

            // Stick is y-up, screen is y-down
            let (x, y) = self.orbit_offset;
            self.orbit_offset = (
                (x + self.steer.0 * STEER_SPEED * elapsed).clamp(-STEER_RANGE, STEER_RANGE),
                (y - self.steer.1 * STEER_SPEED * elapsed).clamp(-STEER_RANGE, STEER_RANGE),
            );
        } else {
            self.steer = (0.0, 0.0);
        }
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext, input: &InputSnapshot) {
        let controlling = self.base.controlling_player();
        let player = controlling.unwrap_or(PlayerIndex::One);

        self.steer = input.virtual_state().left_stick;
        if input.is_new_virtual_button_press(Buttons::A) {
            self.orbit_direction = -self.orbit_direction;
        }

        let (pad, _) = input.gamepad(player);
        let gamepad_unplugged = !pad.connected && input.gamepad_was_connected(player);

        if self.pause_action.evaluate(input, controlling).is_some() || gamepad_unplugged {
            log::debug!("Pausing game");
            let pause_menu = PauseMenuScreen::new(ctx.settings);
            ctx.add_screen(Box::new(pause_menu), controlling);
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        let viewport = renderer.viewport();
        renderer.fill_rect(viewport.bounds(), BACKGROUND_COLOR)?;

        let (center_x, center_y) = viewport.center();
        let center_x = center_x + self.orbit_offset.0 * self.scale;
        let center_y = center_y + self.orbit_offset.1 * self.scale;
        let radius = 200.0 * self.scale;
        let marker = square_around(
            (
                center_x + radius * self.marker_angle.cos(),
                center_y + radius * self.marker_angle.sin(),
            ),
            48.0 * self.scale,
        );
        renderer.fill_rect(marker, Color::YELLOW)?;

        // Fade to black while transitioning or paused
        let position = self.base.transition_position();
        if position > 0.0 || self.pause_alpha > 0.0 {
            let alpha = position + (1.0 - position) * (self.pause_alpha / 2.0);
            renderer.fill_rect(viewport.bounds(), with_alpha(Color::BLACK, alpha))?;
        }

        Ok(())
    }

    fn settings_applied(&mut self, settings: &AppSettings) {
        self.scale = settings.resolution.scale();
    }
}

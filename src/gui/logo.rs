//! Logo Screen
//!
//! Shows a splash image for a fixed time, optionally zooming in slowly.
//! Releasing Space, Enter or Escape, or pressing a mouse button, skips it.

use super::background::fit_to_viewport;
use crate::input::{InputSnapshot, MouseButtons, PlayerIndex};
use crate::render::{with_alpha, AssetError, AssetLoader, Renderer, TextureHandle};
use crate::screen::{Screen, ScreenBase, ScreenContext};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;

/// Zoom at the moment the logo appears
const INITIAL_ZOOM: f32 = 0.9;

/// Zoom growth per second
const ZOOM_RATE: f32 = 0.03;

const SKIP_KEYS: [Keycode; 3] = [Keycode::Space, Keycode::Return, Keycode::Escape];

pub struct LogoScreen {
    base: ScreenBase,
    texture_path: String,
    texture: Option<TextureHandle>,
    /// How long to show the logo
    seconds: f32,
    elapsed: f32,
    zoom: Option<f32>,
    skipped: bool,
}

impl LogoScreen {
    pub fn new(seconds: f32, texture_path: impl Into<String>, zoom: bool) -> Self {
        LogoScreen {
            base: ScreenBase::new(0.5, 0.0),
            texture_path: texture_path.into(),
            texture: None,
            seconds,
            elapsed: 0.0,
            zoom: zoom.then_some(INITIAL_ZOOM),
            skipped: false,
        }
    }

    #[cfg(test)]
    pub fn zoom(&self) -> Option<f32> {
        self.zoom
    }
}

impl Screen for LogoScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "logo"
    }

    fn activate(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.texture = Some(assets.load(&self.texture_path)?);
        Ok(())
    }

    fn deactivate(&mut self, assets: &mut dyn AssetLoader) {
        if let Some(texture) = self.texture.take() {
            assets.unload(texture);
        }
    }

    fn update(
        &mut self,
        _ctx: &mut ScreenContext,
        elapsed: f32,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.base
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);

        self.elapsed += elapsed;
        if let Some(zoom) = self.zoom.as_mut() {
            *zoom += ZOOM_RATE * elapsed;
        }

        if self.skipped || self.elapsed >= self.seconds {
            self.base.exit_screen();
        }
    }

    fn handle_input(&mut self, _ctx: &mut ScreenContext, input: &InputSnapshot) {
        let key_released = SKIP_KEYS.iter().any(|&key| input.is_new_key_release(key));
        let clicked = input.is_mouse_button_down(MouseButtons::LEFT, PlayerIndex::One)
            || input.is_mouse_button_down(MouseButtons::RIGHT, PlayerIndex::One);

        if key_released || clicked {
            log::debug!("Logo {} skipped", self.texture_path);
            self.skipped = true;
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        let Some(texture) = self.texture else {
            return Ok(());
        };
        let tint = with_alpha(Color::WHITE, self.base.transition_alpha());

        match self.zoom {
            Some(zoom) => renderer.draw_sprite(
                texture,
                renderer.viewport().center(),
                (texture.width as f32 / 2.0, texture.height as f32 / 2.0),
                zoom,
                tint,
            ),
            None => {
                let destination = fit_to_viewport(texture, renderer.viewport());
                renderer.draw_region(texture, destination, tint)
            }
        }
    }
}

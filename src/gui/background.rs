//! Background Screen
//!
//! Sits at the bottom of the stack behind the menus. It ignores being covered
//! so it stays put while menus come and go above it.

use crate::render::{fade_to_black, AssetError, AssetLoader, Renderer, TextureHandle, Viewport};
use crate::screen::{Screen, ScreenBase, ScreenContext};
use sdl2::rect::Rect;

pub const DEFAULT_BACKGROUND: &str = "Logos/background";

pub struct BackgroundScreen {
    base: ScreenBase,
    texture_path: String,
    texture: Option<TextureHandle>,
}

impl BackgroundScreen {
    pub fn new(texture_path: impl Into<String>) -> Self {
        BackgroundScreen {
            base: ScreenBase::new(0.5, 0.5),
            texture_path: texture_path.into(),
            texture: None,
        }
    }
}

impl Default for BackgroundScreen {
    fn default() -> Self {
        BackgroundScreen::new(DEFAULT_BACKGROUND)
    }
}

/// Where a full-screen image goes: stretched over the viewport when taller
/// than it, centered at its own size otherwise
pub(crate) fn fit_to_viewport(texture: TextureHandle, viewport: Viewport) -> Rect {
    if texture.height > viewport.height {
        return viewport.bounds();
    }

    let x = (viewport.width as i32 - texture.width as i32) / 2;
    let y = (viewport.height as i32 - texture.height as i32) / 2;
    Rect::new(x, y, texture.width.max(1), texture.height.max(1))
}

impl Screen for BackgroundScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "background"
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
        _covered_by_other_screen: bool,
    ) {
        self.base.update(elapsed, other_screen_has_focus, false);
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        let Some(texture) = self.texture else {
            return Ok(());
        };

        let destination = fit_to_viewport(texture, renderer.viewport());
        renderer.draw_region(
            texture,
            destination,
            fade_to_black(self.base.transition_alpha()),
        )
    }
}

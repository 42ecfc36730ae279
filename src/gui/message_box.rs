//! Message Box
//!
//! A popup asking the player to confirm something. Screens beneath stay
//! visible but darkened; accepting runs the box's [`ConfirmAction`].

use super::background::DEFAULT_BACKGROUND;
use super::menu::{cancel_action, select_action};
use super::{BackgroundScreen, LoadingScreen, MainMenuScreen, MenuStyle};
use crate::input::{InputAction, InputSnapshot, PlayerIndex};
use crate::render::{with_alpha, AssetError, AssetLoader, Renderer, TextureHandle};
use crate::screen::{HostRequest, Screen, ScreenBase, ScreenContext};
use crate::settings::AppSettings;
use crate::text::{BitmapFont, MENU_FONT};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

const USAGE_TEXT: &str = "\nA button, Space, Enter: ok\nB button, Esc: cancel";

pub const GRADIENT_TEXTURE: &str = "Textures/gradient";

/// Panel padding around the text at scale 1.0
const H_PAD: f32 = 32.0;
const V_PAD: f32 = 16.0;

/// What accepting a message box does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Leave the application
    Quit,
    /// Abandon the game and load the main menu
    ReturnToMainMenu,
}

impl ConfirmAction {
    fn run(self, ctx: &mut ScreenContext, controlling: Option<PlayerIndex>) {
        match self {
            ConfirmAction::Quit => ctx.request(HostRequest::Quit),
            ConfirmAction::ReturnToMainMenu => {
                let screens: Vec<Box<dyn Screen>> = vec![
                    Box::new(BackgroundScreen::new(DEFAULT_BACKGROUND)),
                    Box::new(MainMenuScreen::new(ctx.settings)),
                ];
                LoadingScreen::load(ctx, false, controlling, screens);
            }
        }
    }
}

pub struct MessageBoxScreen {
    base: ScreenBase,
    message: String,
    on_accept: ConfirmAction,
    scale: f32,
    font: BitmapFont,
    style: MenuStyle,
    select: InputAction,
    cancel: InputAction,
    gradient: Option<TextureHandle>,
}

impl MessageBoxScreen {
    /// A box showing `message` followed by the control hints
    pub fn new(message: &str, on_accept: ConfirmAction, settings: &AppSettings) -> Self {
        MessageBoxScreen {
            base: ScreenBase::new(0.2, 0.2).popup(),
            message: format!("{}{}", message, USAGE_TEXT),
            on_accept,
            scale: settings.resolution.scale(),
            font: MENU_FONT,
            style: MenuStyle::default(),
            select: select_action(),
            cancel: cancel_action(),
            gradient: None,
        }
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Screen for MessageBoxScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "message box"
    }

    fn activate(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.gradient = Some(assets.load(GRADIENT_TEXTURE)?);
        Ok(())
    }

    fn deactivate(&mut self, assets: &mut dyn AssetLoader) {
        if let Some(texture) = self.gradient.take() {
            assets.unload(texture);
        }
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext, input: &InputSnapshot) {
        let controlling = self.base.controlling_player();

        if let Some(player) = self.select.evaluate(input, controlling) {
            log::debug!("Message box accepted by {:?}", player);
            self.on_accept.run(ctx, Some(player));
            self.base.exit_screen();
        } else if self.cancel.evaluate(input, controlling).is_some() {
            self.base.exit_screen();
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        let viewport = renderer.viewport();
        let alpha = self.base.transition_alpha();

        // Darken everything beneath the popup
        renderer.fill_rect(
            viewport.bounds(),
            with_alpha(Color::BLACK, alpha * self.style.overlay_alpha),
        )?;

        let (width, height) = self.font.measure(&self.message);
        let (width, height) = (width * self.scale, height * self.scale);
        let (center_x, center_y) = viewport.center();
        let text_position = (center_x - width / 2.0, center_y - height / 2.0);

        if let Some(gradient) = self.gradient {
            let panel = Rect::new(
                (text_position.0 - H_PAD * self.scale) as i32,
                (text_position.1 - V_PAD * self.scale) as i32,
                (width + 2.0 * H_PAD * self.scale).max(1.0) as u32,
                (height + 2.0 * V_PAD * self.scale).max(1.0) as u32,
            );
            renderer.draw_region(gradient, panel, with_alpha(Color::WHITE, alpha))?;
        }

        renderer.draw_text(
            &self.font,
            &self.message,
            text_position,
            (0.0, 0.0),
            self.scale,
            with_alpha(Color::WHITE, alpha),
        )
    }

    fn settings_applied(&mut self, settings: &AppSettings) {
        self.scale = settings.resolution.scale();
    }

    fn wants_cursor(&self) -> bool {
        true
    }
}

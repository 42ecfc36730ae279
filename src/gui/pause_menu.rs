//! Pause Menu
//!
//! Popup over the game offering to resume or to quit back to the main menu.

use super::message_box::GRADIENT_TEXTURE;
use super::{ConfirmAction, MenuEntry, MenuScreen, MessageBoxScreen, NavigationOutcome};
use crate::input::InputSnapshot;
use crate::render::{with_alpha, AssetError, AssetLoader, Renderer, TextureHandle};
use crate::screen::{Screen, ScreenBase, ScreenContext};
use crate::settings::AppSettings;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

const RESUME_GAME: usize = 2;
const QUIT_GAME: usize = 5;

/// Panel padding around the entries at scale 1.0
const H_PAD: f32 = 32.0;
const V_PAD: f32 = 16.0;

const QUIT_MESSAGE: &str = "Paused\n\nAre you sure you want to quit this game?\n";

pub struct PauseMenuScreen {
    menu: MenuScreen,
    gradient: Option<TextureHandle>,
}

impl PauseMenuScreen {
    pub fn new(settings: &AppSettings) -> Self {
        let scale = settings.resolution.scale();
        let other_color = super::MenuStyle::default().other_color;

        let entries = vec![
            MenuEntry::spacer(scale),
            MenuEntry::spacer(scale),
            MenuEntry::new("Resume Game", scale),
            MenuEntry::spacer(scale),
            MenuEntry::spacer(scale),
            MenuEntry::new("Quit Game", scale).with_color(other_color),
        ];

        PauseMenuScreen {
            menu: MenuScreen::new("Paused", entries, scale).popup(),
            gradient: None,
        }
    }

    /// Box around every selectable entry, padded
    fn panel(&self) -> Option<Rect> {
        let font = *self.menu.font();
        let scale = self.menu.scale();

        let bounds = self
            .menu
            .entries()
            .iter()
            .filter_map(|entry| entry.bounds(&font))
            .reduce(|a, b| a.union(b))?;

        let h_pad = (H_PAD * scale) as i32;
        let v_pad = (V_PAD * scale) as i32;
        Some(Rect::new(
            bounds.x() - h_pad,
            bounds.y() - v_pad,
            bounds.width() + 2 * h_pad as u32,
            bounds.height() + 2 * v_pad as u32,
        ))
    }
}

impl Screen for PauseMenuScreen {
    fn base(&self) -> &ScreenBase {
        self.menu.base()
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        self.menu.base_mut()
    }

    fn name(&self) -> &'static str {
        "pause menu"
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

    fn update(
        &mut self,
        ctx: &mut ScreenContext,
        elapsed: f32,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.menu.update(
            ctx.viewport(),
            elapsed,
            other_screen_has_focus,
            covered_by_other_screen,
        );
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext, input: &InputSnapshot) {
        match self.menu.handle_input(input) {
            NavigationOutcome::EntrySelected {
                index: RESUME_GAME, ..
            }
            | NavigationOutcome::Cancelled { .. } => self.menu.base_mut().exit_screen(),
            NavigationOutcome::EntrySelected {
                index: QUIT_GAME,
                player,
            } => {
                let confirm = MessageBoxScreen::new(
                    QUIT_MESSAGE,
                    ConfirmAction::ReturnToMainMenu,
                    ctx.settings,
                );
                ctx.add_screen(Box::new(confirm), Some(player));
            }
            _ => {}
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        if let (Some(gradient), Some(panel)) = (self.gradient, self.panel()) {
            let alpha = self.menu.base().transition_alpha();
            renderer.draw_region(gradient, panel, with_alpha(Color::WHITE, alpha))?;
        }
        self.menu.draw(renderer)
    }

    fn settings_applied(&mut self, settings: &AppSettings) {
        self.menu.set_scale(settings.resolution.scale());
    }

    fn wants_cursor(&self) -> bool {
        true
    }
}

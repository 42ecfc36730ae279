//! Loading Screen
//!
//! Moves between menus and the game. Every screen on the stack is told to
//! exit; once they are all gone the loading screen replaces itself with the
//! screens being loaded.

use crate::input::PlayerIndex;
use crate::render::{with_alpha, Renderer};
use crate::screen::{Screen, ScreenBase, ScreenContext, ScreenState};
use crate::text::{BitmapFont, MENU_FONT};
use sdl2::pixels::Color;

const LOADING_TEXT: &str = "Loading...";

pub struct LoadingScreen {
    base: ScreenBase,
    /// Draw "Loading..." while waiting
    loading_is_slow: bool,
    screens_to_load: Vec<Box<dyn Screen>>,
    scale: f32,
    font: BitmapFont,
}

impl LoadingScreen {
    /// Exits every screen and queues a loading screen that will add `screens`
    pub fn load(
        ctx: &mut ScreenContext,
        loading_is_slow: bool,
        controlling_player: Option<PlayerIndex>,
        screens: Vec<Box<dyn Screen>>,
    ) {
        ctx.exit_all_screens();

        let loading = LoadingScreen {
            base: ScreenBase::new(0.5, 0.0),
            loading_is_slow,
            screens_to_load: screens,
            scale: ctx.settings.resolution.scale(),
            font: MENU_FONT,
        };
        ctx.add_screen(Box::new(loading), controlling_player);
    }
}

impl Screen for LoadingScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "loading"
    }

    fn update(
        &mut self,
        ctx: &mut ScreenContext,
        elapsed: f32,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.base
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);

        let other_screens_are_gone =
            self.base.state() == ScreenState::Active && ctx.screen_count() == 1;
        if !other_screens_are_gone || self.screens_to_load.is_empty() {
            return;
        }

        if let Some(id) = self.base.id() {
            ctx.remove_screen(id);
        }

        let controlling_player = self.base.controlling_player();
        for screen in self.screens_to_load.drain(..) {
            log::debug!("Loading finished, adding {}", screen.name());
            ctx.add_screen(screen, controlling_player);
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        if !self.loading_is_slow {
            return Ok(());
        }

        let (width, height) = self.font.measure(LOADING_TEXT);
        let (center_x, center_y) = renderer.viewport().center();

        renderer.draw_text(
            &self.font,
            LOADING_TEXT,
            (center_x, center_y),
            (width / 2.0, height / 2.0),
            self.scale,
            with_alpha(Color::WHITE, self.base.transition_alpha()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::testing::{ContextParts, Harness};
    use crate::gui::{BackgroundScreen, GameplayScreen, MainMenuScreen};
    use crate::render::testing::RecordingRenderer;
    use crate::screen::ScreenCommand;

    #[test]
    fn test_load_exits_everything_first() {
        let mut parts = ContextParts::new();
        LoadingScreen::load(&mut parts.context(), false, None, Vec::new());

        assert!(matches!(parts.commands[0], ScreenCommand::ExitAll));
        assert_eq!(parts.added(), vec!["loading"]);
    }

    #[test]
    fn test_waits_for_other_screens() {
        let mut harness = Harness::new();
        harness.add(BackgroundScreen::default());
        harness.add(MainMenuScreen::new(&harness.settings));
        harness.run(1.0);

        let mut parts = ContextParts::new();
        let screens: Vec<Box<dyn Screen>> = vec![Box::new(GameplayScreen::new(&harness.settings))];
        LoadingScreen::load(&mut parts.context(), true, Some(PlayerIndex::Two), screens);
        for command in parts.commands.drain(..) {
            match command {
                ScreenCommand::ExitAll => harness.stack.exit_all_screens(),
                ScreenCommand::Add {
                    screen,
                    controlling_player,
                    ..
                } => {
                    harness.stack.add_screen(screen, controlling_player);
                }
                ScreenCommand::Remove(id) => harness.stack.remove_screen(id),
            }
        }

        harness.frame(0.125);
        assert_eq!(harness.names(), vec!["background", "main menu", "loading"]);

        harness.run(0.5);
        assert_eq!(harness.names(), vec!["loading"]);

        harness.run(0.25);
        assert_eq!(harness.names(), vec!["gameplay"]);
    }

    #[test]
    fn test_slow_loading_draws_text() {
        let mut parts = ContextParts::new();
        let mut loading = LoadingScreen {
            base: ScreenBase::new(0.5, 0.0),
            loading_is_slow: true,
            screens_to_load: Vec::new(),
            scale: 1.0,
            font: MENU_FONT,
        };
        loading.update(&mut parts.context(), 1.0, false, false);

        let mut renderer = RecordingRenderer::new(800, 480);
        loading.draw(&mut renderer).unwrap();
        assert!(!renderer.calls.is_empty());

        loading.loading_is_slow = false;
        renderer.calls.clear();
        loading.draw(&mut renderer).unwrap();
        assert!(renderer.calls.is_empty());
    }
}

//! Main Menu
//!
//! The first menu after the intro: start the game, open the options, or quit.

use super::{
    ConfirmAction, GameplayScreen, LoadingScreen, MenuEntry, MenuScreen, MenuStyle,
    MessageBoxScreen, NavigationOutcome, OptionsMenuScreen,
};
use crate::input::{InputSnapshot, PlayerIndex};
use crate::render::Renderer;
use crate::screen::{Screen, ScreenBase, ScreenContext};
use crate::settings::AppSettings;

const PLAY_GAME: usize = 3;
const OPTIONS: usize = 5;
const QUIT_TO_DESKTOP: usize = 11;

const EXIT_MESSAGE: &str = "Are you sure you want to exit?\n";

pub struct MainMenuScreen {
    menu: MenuScreen,
}

impl MainMenuScreen {
    pub fn new(settings: &AppSettings) -> Self {
        let scale = settings.resolution.scale();
        let other_color = MenuStyle::default().other_color;

        let mut entries: Vec<MenuEntry> = (0..12).map(|_| MenuEntry::spacer(scale)).collect();
        entries[PLAY_GAME] = MenuEntry::new("Play Game", scale);
        entries[OPTIONS] = MenuEntry::new("Options", scale);
        entries[QUIT_TO_DESKTOP] = MenuEntry::new("Quit To Desktop", scale).with_color(other_color);

        MainMenuScreen {
            menu: MenuScreen::new("Main Menu", entries, scale),
        }
    }

    fn confirm_exit(ctx: &mut ScreenContext, player: PlayerIndex) {
        let confirm = MessageBoxScreen::new(EXIT_MESSAGE, ConfirmAction::Quit, ctx.settings);
        ctx.add_screen(Box::new(confirm), Some(player));
    }
}

impl Screen for MainMenuScreen {
    fn base(&self) -> &ScreenBase {
        self.menu.base()
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        self.menu.base_mut()
    }

    fn name(&self) -> &'static str {
        "main menu"
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
                index: PLAY_GAME,
                player,
            } => {
                let screens: Vec<Box<dyn Screen>> =
                    vec![Box::new(GameplayScreen::new(ctx.settings))];
                LoadingScreen::load(ctx, true, Some(player), screens);
            }
            NavigationOutcome::EntrySelected {
                index: OPTIONS,
                player,
            } => {
                let options = OptionsMenuScreen::new(ctx.settings, ctx.display_modes);
                ctx.add_screen(Box::new(options), Some(player));
            }
            NavigationOutcome::EntrySelected {
                index: QUIT_TO_DESKTOP,
                player,
            }
            | NavigationOutcome::Cancelled { player } => Self::confirm_exit(ctx, player),
            _ => {}
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        self.menu.draw(renderer)
    }

    fn settings_applied(&mut self, settings: &AppSettings) {
        self.menu.set_scale(settings.resolution.scale());
    }

    fn wants_cursor(&self) -> bool {
        true
    }
}

//! Options Menu
//!
//! Edits a draft copy of the settings. Select steps a value forward and the
//! "previous" binding steps it back. Accept commits the draft and asks the
//! host to save and apply it; Back or cancel throws it away.

use super::{MenuEntry, MenuScreen, NavigationOutcome};
use crate::input::InputSnapshot;
use crate::render::Renderer;
use crate::screen::{HostRequest, Screen, ScreenBase, ScreenContext};
use crate::settings::{AppSettings, Resolution, FALLBACK_RESOLUTIONS, MAX_VOLUME};

const FULL_SCREEN: usize = 2;
const RESOLUTION: usize = 4;
const VOLUME: usize = 6;
const GRAPHICS_DETAIL: usize = 8;
const ACCEPT: usize = 11;
const BACK: usize = 12;

const ENTRY_COUNT: usize = 13;

pub struct OptionsMenuScreen {
    menu: MenuScreen,
    draft: AppSettings,
    resolutions: Vec<Resolution>,
    current_resolution: usize,
}

impl OptionsMenuScreen {
    /// Starts a draft of `settings`; `display_modes` are the resolutions
    /// offered, smallest first
    pub fn new(settings: &AppSettings, display_modes: &[Resolution]) -> Self {
        let scale = settings.resolution.scale();

        let mut entries: Vec<MenuEntry> = (0..ENTRY_COUNT)
            .map(|_| MenuEntry::spacer(scale))
            .collect();
        for index in [FULL_SCREEN, RESOLUTION, VOLUME, GRAPHICS_DETAIL] {
            entries[index] = MenuEntry::new("-", scale);
        }
        entries[ACCEPT] = MenuEntry::new("Accept", scale);
        entries[BACK] = MenuEntry::new("Back", scale);

        let resolutions = if display_modes.is_empty() {
            FALLBACK_RESOLUTIONS.to_vec()
        } else {
            display_modes.to_vec()
        };
        let current_resolution = resolutions
            .iter()
            .position(|resolution| *resolution == settings.resolution)
            .unwrap_or(0);

        let mut options = OptionsMenuScreen {
            menu: MenuScreen::new("Options", entries, scale).with_select_previous(),
            draft: settings.clone(),
            resolutions,
            current_resolution,
        };
        options.set_menu_entry_text();
        options
    }

    #[cfg(test)]
    pub fn draft(&self) -> &AppSettings {
        &self.draft
    }

    fn set_menu_entry_text(&mut self) {
        let volume_suffix = match self.draft.volume_main {
            0 => " (Mute)",
            MAX_VOLUME => " (Full)",
            _ => "",
        };

        let texts = [
            (
                FULL_SCREEN,
                format!(
                    "Full Screen: {}",
                    if self.draft.is_full_screen { "On" } else { "Off" }
                ),
            ),
            (RESOLUTION, format!("Resolution: {}", self.draft.resolution)),
            (
                VOLUME,
                format!("Volume: {}{}", self.draft.volume_main, volume_suffix),
            ),
            (
                GRAPHICS_DETAIL,
                format!("Graphics Detail: {}", self.draft.graphics_detail),
            ),
        ];

        for (index, text) in texts {
            if let Some(entry) = self.menu.entry_mut(index) {
                entry.set_text(text);
            }
        }
    }

    /// Steps the resolution through the mode list, wrapping at both ends
    fn step_resolution(&mut self, forward: bool) {
        let count = self.resolutions.len();
        if count == 0 {
            return;
        }
        self.current_resolution = if forward {
            (self.current_resolution + 1) % count
        } else {
            (self.current_resolution + count - 1) % count
        };
        self.draft.resolution = self.resolutions[self.current_resolution];
    }

    fn step_volume(&mut self, forward: bool) {
        self.draft.volume_main = if forward {
            (self.draft.volume_main + 1) % (MAX_VOLUME + 1)
        } else {
            self.draft.volume_main.checked_sub(1).unwrap_or(MAX_VOLUME)
        };
    }

    /// Applies a select (`forward`) or select-previous on `index`
    fn change_entry(&mut self, ctx: &mut ScreenContext, index: usize, forward: bool) {
        match index {
            FULL_SCREEN => self.draft.is_full_screen = !self.draft.is_full_screen,
            // Select walks down the mode list, previous walks up
            RESOLUTION => self.step_resolution(!forward),
            VOLUME => self.step_volume(forward),
            GRAPHICS_DETAIL => {
                self.draft.graphics_detail = if forward {
                    self.draft.graphics_detail.next()
                } else {
                    self.draft.graphics_detail.previous()
                };
            }
            ACCEPT if forward => {
                log::info!("Options accepted ({})", self.draft.resolution);
                *ctx.settings = self.draft.clone();
                ctx.request(HostRequest::SaveSettings);
                ctx.request(HostRequest::SettingsApplied);
                self.menu.base_mut().exit_screen();
            }
            BACK if forward => self.menu.base_mut().exit_screen(),
            _ => {}
        }

        self.set_menu_entry_text();
    }
}

impl Screen for OptionsMenuScreen {
    fn base(&self) -> &ScreenBase {
        self.menu.base()
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        self.menu.base_mut()
    }

    fn name(&self) -> &'static str {
        "options menu"
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
            NavigationOutcome::EntrySelected { index, .. } => self.change_entry(ctx, index, true),
            NavigationOutcome::EntrySelectedPrevious { index, .. } => {
                self.change_entry(ctx, index, false)
            }
            NavigationOutcome::Cancelled { .. } => self.menu.base_mut().exit_screen(),
            NavigationOutcome::None => {}
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

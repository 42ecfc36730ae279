//! Intro sequencing
//!
//! Whenever the screen stack runs empty the launcher pushes what comes next:
//! the company logo, then the title logo, then the background and main menu.
//! Once the menus are reached they are pushed again every time the stack
//! empties.

use crate::gui::{BackgroundScreen, LogoScreen, MainMenuScreen};
use crate::screen::ScreenStack;
use crate::settings::AppSettings;

/// Seconds each intro logo stays up
const LOGO_SECONDS: f32 = 4.0;

const COMPANY_LOGO: &str = "Logos/CompanyLogo";
const MAIN_TITLE: &str = "Logos/MainTitle";

/// Where the intro is up to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStage {
    CompanyLogo,
    MainTitle,
    Menus,
}

#[derive(Debug)]
pub struct IntroSequence {
    stage: IntroStage,
}

impl IntroSequence {
    pub fn new() -> Self {
        IntroSequence {
            stage: IntroStage::CompanyLogo,
        }
    }

    #[cfg(test)]
    pub fn stage(&self) -> IntroStage {
        self.stage
    }

    /// Pushes the next stage if the stack is empty. Call once per frame
    /// before updating the stack.
    pub fn update(&mut self, stack: &mut ScreenStack, settings: &AppSettings) {
        if !stack.is_empty() {
            return;
        }

        match self.stage {
            IntroStage::CompanyLogo => {
                stack.add_screen(
                    Box::new(LogoScreen::new(LOGO_SECONDS, COMPANY_LOGO, true)),
                    None,
                );
                self.stage = IntroStage::MainTitle;
            }
            IntroStage::MainTitle => {
                stack.add_screen(
                    Box::new(LogoScreen::new(LOGO_SECONDS, MAIN_TITLE, true)),
                    None,
                );
                self.stage = IntroStage::Menus;
            }
            IntroStage::Menus => {
                stack.add_screen(Box::new(BackgroundScreen::default()), None);
                stack.add_screen(Box::new(MainMenuScreen::new(settings)), None);
            }
        }

        log::info!("Intro advanced to {:?}", self.stage);
    }
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self::new()
    }
}

//! Menu Screens
//!
//! Every screen the application can show. Menus share the [`MenuScreen`]
//! core; the rest are single-purpose screens.
//!
//! # Available Screens
//!
//! - [`BackgroundScreen`] - Full-window texture behind the menus
//! - [`LogoScreen`] - Timed, skippable splash image
//! - [`MainMenuScreen`] - Play / Options / Quit
//! - [`OptionsMenuScreen`] - Edits a draft of the settings
//! - [`PauseMenuScreen`] - Popup over gameplay
//! - [`MessageBoxScreen`] - Popup confirmation
//! - [`LoadingScreen`] - Clears the stack, then adds the next screens
//! - [`GameplayScreen`] - Stand-in for the game itself
//!
//! # Example Usage
//!
//! ```rust
//! use crate::gui::{BackgroundScreen, MainMenuScreen};
//!
//! stack.add_screen(Box::new(BackgroundScreen::default()), None);
//! stack.add_screen(Box::new(MainMenuScreen::new(&settings)), None);
//! ```

pub mod background;
pub mod gameplay;
pub mod loading;
pub mod logo;
pub mod main_menu;
pub mod menu;
pub mod menu_entry;
pub mod message_box;
pub mod options_menu;
pub mod pause_menu;

pub use background::BackgroundScreen;
pub use gameplay::GameplayScreen;
pub use loading::LoadingScreen;
pub use logo::LogoScreen;
pub use main_menu::MainMenuScreen;
pub use menu::{MenuScreen, MenuStyle, NavigationOutcome};
pub use menu_entry::MenuEntry;
pub use message_box::{ConfirmAction, MessageBoxScreen};
pub use options_menu::OptionsMenuScreen;
pub use pause_menu::PauseMenuScreen;

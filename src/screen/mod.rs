//! Screen system
//!
//! A screen is one layer of the interface: a background, a logo, a menu, a
//! popup. Screens live on a [`ScreenStack`], which drives their transitions,
//! routes input to the focused one and draws them back to front.
//!
//! # Module Organization
//!
//! - `transition`: the timed on/off state machine every screen carries
//! - `stack`: ordered screen collection with queued mutation
//!
//! Screens never hold a reference to the stack. They change it through the
//! [`ScreenContext`] handed to `update`/`handle_input`, which queues commands
//! the stack applies at the start of the next frame.

pub mod stack;
pub mod transition;

pub use stack::ScreenStack;
pub use transition::ScreenState;
use transition::Transition;

use crate::input::{InputSnapshot, PlayerIndex};
use crate::render::{AssetError, AssetLoader, Renderer, Viewport};
use crate::settings::{AppSettings, Resolution};

/// Stable identity of a screen on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(u64);

/// Hands out screen ids in increasing order
#[derive(Debug, Default)]
pub(crate) struct ScreenIds {
    next: u64,
}

impl ScreenIds {
    pub(crate) fn allocate(&mut self) -> ScreenId {
        self.next += 1;
        ScreenId(self.next)
    }
}

/// Requests a screen makes of the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    Quit,
    /// Persist the current settings
    SaveSettings,
    /// Settings changed; resize the window and rescale every screen
    SettingsApplied,
}

/// Stack mutation queued by a screen or the host
pub(crate) enum ScreenCommand {
    Add {
        id: ScreenId,
        screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    },
    Remove(ScreenId),
    ExitAll,
}

/// What a screen may see and change while it updates
pub struct ScreenContext<'a> {
    pub settings: &'a mut AppSettings,
    /// Resolutions the display supports, smallest first
    pub display_modes: &'a [Resolution],
    viewport: Viewport,
    screen_count: usize,
    commands: &'a mut Vec<ScreenCommand>,
    requests: &'a mut Vec<HostRequest>,
    ids: &'a mut ScreenIds,
}

impl<'a> ScreenContext<'a> {
    pub(crate) fn new(
        settings: &'a mut AppSettings,
        display_modes: &'a [Resolution],
        viewport: Viewport,
        screen_count: usize,
        commands: &'a mut Vec<ScreenCommand>,
        requests: &'a mut Vec<HostRequest>,
        ids: &'a mut ScreenIds,
    ) -> Self {
        ScreenContext {
            settings,
            display_modes,
            viewport,
            screen_count,
            commands,
            requests,
            ids,
        }
    }

    /// Queues a screen to be activated and pushed on top of the stack.
    pub fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    ) -> ScreenId {
        let id = self.ids.allocate();
        self.commands.push(ScreenCommand::Add {
            id,
            screen,
            controlling_player,
        });
        id
    }

    /// Queues removal of a screen without a transition.
    pub fn remove_screen(&mut self, id: ScreenId) {
        self.commands.push(ScreenCommand::Remove(id));
    }

    /// Queues `exit_screen` on every screen currently on the stack.
    ///
    /// Screens added after this call are not affected.
    pub fn exit_all_screens(&mut self) {
        self.commands.push(ScreenCommand::ExitAll);
    }

    pub fn request(&mut self, request: HostRequest) {
        if !self.requests.contains(&request) {
            self.requests.push(request);
        }
    }

    /// Number of screens on the stack this frame
    pub fn screen_count(&self) -> usize {
        self.screen_count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// State shared by every screen: identity, transition and focus
#[derive(Debug, Clone)]
pub struct ScreenBase {
    id: Option<ScreenId>,
    transition: Transition,
    is_popup: bool,
    other_screen_has_focus: bool,
    controlling_player: Option<PlayerIndex>,
}

impl ScreenBase {
    pub fn new(transition_on: f32, transition_off: f32) -> Self {
        ScreenBase {
            id: None,
            transition: Transition::new(transition_on, transition_off),
            is_popup: false,
            other_screen_has_focus: false,
            controlling_player: None,
        }
    }

    /// Marks the screen as a popup: screens beneath keep drawing and are not
    /// considered covered.
    pub fn popup(mut self) -> Self {
        self.is_popup = true;
        self
    }

    pub(crate) fn attach(&mut self, id: ScreenId, controlling_player: Option<PlayerIndex>) {
        self.id = Some(id);
        self.controlling_player = controlling_player;
    }

    /// Default per-frame update: records focus and advances the transition
    pub fn update(&mut self, elapsed: f32, other_screen_has_focus: bool, covered: bool) {
        self.other_screen_has_focus = other_screen_has_focus;
        self.transition.update(elapsed, covered);
    }

    /// Starts the exit transition; the stack prunes the screen once hidden.
    pub fn exit_screen(&mut self) {
        self.transition.exit();
    }

    pub fn id(&self) -> Option<ScreenId> {
        self.id
    }

    pub fn state(&self) -> ScreenState {
        self.transition.state()
    }

    pub fn transition_position(&self) -> f32 {
        self.transition.position()
    }

    pub fn transition_alpha(&self) -> f32 {
        self.transition.alpha()
    }

    #[cfg(test)]
    pub fn is_exiting(&self) -> bool {
        self.transition.is_exiting()
    }

    pub fn is_removable(&self) -> bool {
        self.transition.is_removable()
    }

    pub fn is_popup(&self) -> bool {
        self.is_popup
    }

    /// Visible and holding input focus
    pub fn is_active(&self) -> bool {
        !self.other_screen_has_focus
            && matches!(
                self.state(),
                ScreenState::TransitionOn | ScreenState::Active
            )
    }

    /// Player whose input this screen reads; `None` accepts any player
    pub fn controlling_player(&self) -> Option<PlayerIndex> {
        self.controlling_player
    }
}

/// A layer on the screen stack
///
/// Implementors embed a [`ScreenBase`] and expose it through `base`/`base_mut`;
/// every other method has a default suited to a passive screen.
pub trait Screen {
    fn base(&self) -> &ScreenBase;

    fn base_mut(&mut self) -> &mut ScreenBase;

    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Loads assets. Called once, before the screen first updates.
    fn activate(&mut self, _assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        Ok(())
    }

    /// Releases assets. Called once, when the screen leaves the stack.
    fn deactivate(&mut self, _assets: &mut dyn AssetLoader) {}

    /// Called every frame for every screen on the stack
    fn update(
        &mut self,
        _ctx: &mut ScreenContext,
        elapsed: f32,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.base_mut()
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);
    }

    /// Called only for the screen holding input focus
    fn handle_input(&mut self, _ctx: &mut ScreenContext, _input: &InputSnapshot) {}

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String>;

    /// Settings were applied; rescale to the new resolution
    fn settings_applied(&mut self, _settings: &AppSettings) {}

    /// Whether the mouse cursor should be drawn over this screen
    fn wants_cursor(&self) -> bool {
        false
    }
}

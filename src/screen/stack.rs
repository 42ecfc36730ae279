use super::{
    HostRequest, Screen, ScreenCommand, ScreenContext, ScreenId, ScreenIds, ScreenState,
};
use crate::input::{InputSnapshot, PlayerIndex};
use crate::render::{AssetError, AssetLoader, Renderer, Viewport};
use crate::settings::{AppSettings, Resolution};

/// Read-only view of one screen on the stack
#[allow(dead_code)] // built only by ScreenStack::screens
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSummary {
    pub id: ScreenId,
    pub name: &'static str,
    pub state: ScreenState,
    pub is_popup: bool,
    pub transition_position: f32,
}

/// Ordered collection of screens, back to front
///
/// Adds and removes are queued and applied at the start of the next
/// [`update`](ScreenStack::update), after exited screens are pruned, so
/// iteration never sees a half-mutated stack.
///
/// # Focus
///
/// Each frame the stack is scanned from the top. The first screen that is
/// transitioning on or active receives `handle_input`; every screen below it
/// is told another screen has focus. Every screen below the first such
/// non-popup screen is also told it is covered.
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    pending: Vec<ScreenCommand>,
    ids: ScreenIds,
    display_modes: Vec<Resolution>,
    viewport: Viewport,
    window_focused: bool,
}

impl ScreenStack {
    pub fn new(viewport: Viewport, display_modes: Vec<Resolution>) -> Self {
        ScreenStack {
            screens: Vec::new(),
            pending: Vec::new(),
            ids: ScreenIds::default(),
            display_modes,
            viewport,
            window_focused: true,
        }
    }

    /// Queues a screen for the top of the stack.
    pub fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    ) -> ScreenId {
        let id = self.ids.allocate();
        self.pending.push(ScreenCommand::Add {
            id,
            screen,
            controlling_player,
        });
        id
    }

    /// Queues removal of a screen, skipping its exit transition.
    #[allow(dead_code)] // screens remove themselves through ScreenContext
    pub fn remove_screen(&mut self, id: ScreenId) {
        self.pending.push(ScreenCommand::Remove(id));
    }

    /// Queues `exit_screen` on every screen now on the stack.
    #[allow(dead_code)] // screens exit the stack through ScreenContext
    pub fn exit_all_screens(&mut self) {
        self.pending.push(ScreenCommand::ExitAll);
    }

    /// Copy of the current stack contents, back to front
    #[allow(dead_code)] // inspection only, the frame loop never needs it
    pub fn screens(&self) -> Vec<ScreenSummary> {
        self.screens
            .iter()
            .filter_map(|screen| {
                let base = screen.base();
                Some(ScreenSummary {
                    id: base.id()?,
                    name: screen.name(),
                    state: base.state(),
                    is_popup: base.is_popup(),
                    transition_position: base.transition_position(),
                })
            })
            .collect()
    }

    /// No screens on the stack and none waiting to be added
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
            && !self
                .pending
                .iter()
                .any(|command| matches!(command, ScreenCommand::Add { .. }))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_display_modes(&mut self, display_modes: Vec<Resolution>) {
        self.display_modes = display_modes;
    }

    /// While the window is unfocused no screen receives input.
    pub fn set_window_focused(&mut self, focused: bool) {
        self.window_focused = focused;
    }

    /// Runs one frame: prune, apply queued changes, then update every screen
    /// top to bottom and give input to the focused one.
    ///
    /// Returns the host requests screens made this frame. An asset failure
    /// while activating a queued screen is returned before any screen updates;
    /// that screen is dropped and later queued changes are kept for the next
    /// frame.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        elapsed: f32,
        settings: &mut AppSettings,
        assets: &mut dyn AssetLoader,
    ) -> Result<Vec<HostRequest>, AssetError> {
        self.prune_hidden(assets);
        self.apply_pending(assets)?;

        let mut requests = Vec::new();
        let mut other_screen_has_focus = !self.window_focused;
        let mut covered_by_other_screen = false;
        let screen_count = self.screens.len();

        for screen in self.screens.iter_mut().rev() {
            let mut ctx = ScreenContext::new(
                &mut *settings,
                &self.display_modes,
                self.viewport,
                screen_count,
                &mut self.pending,
                &mut requests,
                &mut self.ids,
            );

            screen.update(
                &mut ctx,
                elapsed,
                other_screen_has_focus,
                covered_by_other_screen,
            );

            if matches!(
                screen.base().state(),
                ScreenState::TransitionOn | ScreenState::Active
            ) {
                if !other_screen_has_focus {
                    screen.handle_input(&mut ctx, input);
                    other_screen_has_focus = true;
                }
                if !screen.base().is_popup() {
                    covered_by_other_screen = true;
                }
            }
        }

        Ok(requests)
    }

    fn prune_hidden(&mut self, assets: &mut dyn AssetLoader) {
        let mut index = 0;
        while index < self.screens.len() {
            if self.screens[index].base().is_removable() {
                let mut screen = self.screens.remove(index);
                screen.deactivate(assets);
                log::info!("Removed screen {}", screen.name());
            } else {
                index += 1;
            }
        }
    }

    fn apply_pending(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        let mut commands = std::mem::take(&mut self.pending).into_iter();

        while let Some(command) = commands.next() {
            match command {
                ScreenCommand::Add {
                    id,
                    mut screen,
                    controlling_player,
                } => {
                    screen.base_mut().attach(id, controlling_player);
                    if let Err(e) = screen.activate(assets) {
                        log::warn!("Failed to activate screen {}: {}", screen.name(), e);
                        self.pending = commands.collect();
                        return Err(e);
                    }
                    log::info!("Added screen {}", screen.name());
                    self.screens.push(screen);
                }
                ScreenCommand::Remove(id) => {
                    if let Some(index) = self
                        .screens
                        .iter()
                        .position(|screen| screen.base().id() == Some(id))
                    {
                        let mut screen = self.screens.remove(index);
                        screen.deactivate(assets);
                        log::info!("Removed screen {}", screen.name());
                    }
                }
                ScreenCommand::ExitAll => {
                    for screen in &mut self.screens {
                        screen.base_mut().exit_screen();
                    }
                }
            }
        }

        Ok(())
    }

    /// Draws every visible screen, back to front
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        for screen in &self.screens {
            if screen.base().state() == ScreenState::Hidden {
                continue;
            }
            screen.draw(renderer)?;
        }
        Ok(())
    }

    /// Lets every screen rescale after a settings change
    pub fn settings_applied(&mut self, settings: &AppSettings) {
        self.viewport = settings.resolution.viewport();
        for screen in &mut self.screens {
            screen.settings_applied(settings);
        }
    }

    /// Whether the topmost visible screen wants the mouse cursor drawn
    pub fn wants_cursor(&self) -> bool {
        self.screens
            .iter()
            .rev()
            .find(|screen| {
                matches!(
                    screen.base().state(),
                    ScreenState::TransitionOn | ScreenState::Active
                )
            })
            .is_some_and(|screen| screen.wants_cursor())
    }

    /// Removes every screen, releasing its assets
    pub fn clear(&mut self, assets: &mut dyn AssetLoader) {
        self.pending.clear();
        for mut screen in self.screens.drain(..) {
            screen.deactivate(assets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::snapshot::testing::FakeInput;
    use crate::render::testing::RecordingRenderer;
    use crate::render::TextureHandle;
    use crate::screen::ScreenBase;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// What a spy screen saw on its last update
    #[derive(Debug, Default, Clone)]
    struct SpyLog {
        updates: usize,
        inputs: usize,
        other_screen_has_focus: bool,
        covered: bool,
        draws: usize,
    }

    struct SpyScreen {
        base: ScreenBase,
        texture_name: Option<&'static str>,
        texture: Option<TextureHandle>,
        log: Rc<RefCell<SpyLog>>,
        on_input: Option<Box<dyn FnMut(&mut ScreenContext)>>,
        cursor: bool,
    }

    impl SpyScreen {
        fn new(on: f32, off: f32) -> (Self, Rc<RefCell<SpyLog>>) {
            let log = Rc::new(RefCell::new(SpyLog::default()));
            let screen = SpyScreen {
                base: ScreenBase::new(on, off),
                texture_name: None,
                texture: None,
                log: Rc::clone(&log),
                on_input: None,
                cursor: false,
            };
            (screen, log)
        }

        fn popup(mut self) -> Self {
            self.base = self.base.popup();
            self
        }

        fn on_input(&mut self, callback: impl FnMut(&mut ScreenContext) + 'static) {
            self.on_input = Some(Box::new(callback));
        }
    }

    impl Screen for SpyScreen {
        fn base(&self) -> &ScreenBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ScreenBase {
            &mut self.base
        }

        fn name(&self) -> &'static str {
            "spy"
        }

        fn activate(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
            if let Some(name) = self.texture_name {
                self.texture = Some(assets.load(name)?);
            }
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
            let mut log = self.log.borrow_mut();
            log.updates += 1;
            log.other_screen_has_focus = other_screen_has_focus;
            log.covered = covered_by_other_screen;
        }

        fn handle_input(&mut self, ctx: &mut ScreenContext, _input: &InputSnapshot) {
            self.log.borrow_mut().inputs += 1;
            if let Some(callback) = self.on_input.as_mut() {
                callback(ctx);
            }
        }

        fn draw(&self, _renderer: &mut dyn Renderer) -> Result<(), String> {
            self.log.borrow_mut().draws += 1;
            Ok(())
        }

        fn wants_cursor(&self) -> bool {
            self.cursor
        }
    }

    struct Harness {
        stack: ScreenStack,
        input: InputSnapshot,
        settings: AppSettings,
        renderer: RecordingRenderer,
    }

    impl Harness {
        fn new() -> Self {
            let viewport = Viewport::new(800, 480);
            let mut input = InputSnapshot::new(viewport);
            input.refresh(&mut FakeInput::new(), 0.0);
            Harness {
                stack: ScreenStack::new(viewport, Vec::new()),
                input,
                settings: AppSettings::default(),
                renderer: RecordingRenderer::new(800, 480),
            }
        }

        fn frame(&mut self, elapsed: f32) -> Vec<HostRequest> {
            self.stack
                .update(&self.input, elapsed, &mut self.settings, &mut self.renderer)
                .unwrap()
        }
    }

    #[test]
    fn test_added_screen_waits_for_update() {
        let mut harness = Harness::new();
        let (screen, log) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(screen), None);
        assert_eq!(harness.stack.len(), 0);
        assert!(!harness.stack.is_empty());

        harness.frame(0.1);
        assert_eq!(harness.stack.len(), 1);
        assert_eq!(log.borrow().updates, 1);
    }

    #[test]
    fn test_top_screen_takes_focus_and_covers() {
        let mut harness = Harness::new();
        let (background, background_log) = SpyScreen::new(0.0, 0.0);
        let (menu, menu_log) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(background), None);
        harness.stack.add_screen(Box::new(menu), None);
        harness.frame(0.1);
        harness.frame(0.1);

        assert_eq!(menu_log.borrow().inputs, 2);
        assert!(!menu_log.borrow().covered);
        assert_eq!(background_log.borrow().inputs, 0);
        assert!(background_log.borrow().other_screen_has_focus);
        assert!(background_log.borrow().covered);
    }

    #[test]
    fn test_popup_takes_focus_without_covering() {
        let mut harness = Harness::new();
        let (menu, menu_log) = SpyScreen::new(0.0, 0.0);
        let (popup, popup_log) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(menu), None);
        harness.stack.add_screen(Box::new(popup.popup()), None);
        harness.frame(0.1);

        assert_eq!(popup_log.borrow().inputs, 1);
        assert_eq!(menu_log.borrow().inputs, 0);
        assert!(menu_log.borrow().other_screen_has_focus);
        assert!(!menu_log.borrow().covered);
    }

    #[test]
    fn test_unfocused_window_blocks_input() {
        let mut harness = Harness::new();
        let (menu, log) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(menu), None);
        harness.stack.set_window_focused(false);
        harness.frame(0.1);

        assert_eq!(log.borrow().updates, 1);
        assert_eq!(log.borrow().inputs, 0);
    }

    #[test]
    fn test_exiting_screen_removed_after_off_time() {
        let mut harness = Harness::new();
        let (screen, _log) = SpyScreen::new(0.5, 0.5);

        let id = harness.stack.add_screen(Box::new(screen), None);
        harness.frame(0.0);
        harness.stack.screens.iter_mut().for_each(|s| s.base_mut().exit_screen());
        assert_eq!(harness.stack.screens()[0].id, id);

        // 0.375s of exiting: still present
        for _ in 0..3 {
            harness.frame(0.125);
            assert_eq!(harness.stack.len(), 1);
        }

        // Fourth step reaches 0.5s and hides; pruned at the start of the next frame
        harness.frame(0.125);
        assert_eq!(harness.stack.screens()[0].state, ScreenState::Hidden);
        harness.frame(0.125);
        assert!(harness.stack.is_empty());
    }

    #[test]
    fn test_zero_duration_exit_hides_immediately() {
        let mut harness = Harness::new();
        let (screen, log) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(screen), None);
        harness.frame(0.1);
        harness.stack.screens[0].base_mut().exit_screen();

        harness.stack.draw(&mut harness.renderer).unwrap();
        assert_eq!(log.borrow().draws, 0);

        harness.frame(0.1);
        assert!(harness.stack.is_empty());
    }

    #[test]
    fn test_commands_from_screens_apply_next_frame() {
        let mut harness = Harness::new();
        let (mut screen, _log) = SpyScreen::new(0.0, 0.0);
        let (child, child_log) = SpyScreen::new(0.0, 0.0);
        let mut child = Some(child);
        screen.on_input(move |ctx| {
            if let Some(child) = child.take() {
                ctx.add_screen(Box::new(child), Some(PlayerIndex::Two));
                ctx.request(HostRequest::SaveSettings);
            }
        });

        harness.stack.add_screen(Box::new(screen), None);
        let requests = harness.frame(0.1);
        assert_eq!(requests, vec![HostRequest::SaveSettings]);
        assert_eq!(harness.stack.len(), 1);

        harness.frame(0.1);
        assert_eq!(harness.stack.len(), 2);
        assert_eq!(child_log.borrow().inputs, 1);
        assert_eq!(
            harness.stack.screens[1].base().controlling_player(),
            Some(PlayerIndex::Two)
        );
    }

    #[test]
    fn test_exit_all_spares_later_additions() {
        let mut harness = Harness::new();
        let (first, _) = SpyScreen::new(0.0, 0.0);
        let (second, _) = SpyScreen::new(0.0, 0.0);
        let (loader, _) = SpyScreen::new(0.0, 0.0);
        let (mut trigger, _) = SpyScreen::new(0.0, 0.0);
        let mut loader = Some(loader);
        trigger.on_input(move |ctx| {
            if let Some(loader) = loader.take() {
                ctx.exit_all_screens();
                ctx.add_screen(Box::new(loader), None);
            }
        });

        harness.stack.add_screen(Box::new(first), None);
        harness.stack.add_screen(Box::new(second), None);
        harness.stack.add_screen(Box::new(trigger), None);
        harness.frame(0.1);
        harness.frame(0.1);
        assert_eq!(harness.stack.len(), 4);

        harness.frame(0.1);
        assert_eq!(harness.stack.len(), 1);
        assert_eq!(harness.stack.screens()[0].state, ScreenState::Active);
    }

    #[test]
    fn test_remove_screen_deactivates() {
        let mut harness = Harness::new();
        let (mut screen, _) = SpyScreen::new(0.0, 0.0);
        screen.texture_name = Some("Logos/background");

        let id = harness.stack.add_screen(Box::new(screen), None);
        harness.frame(0.1);
        assert_eq!(harness.renderer.loaded, vec!["Logos/background".to_string()]);

        harness.stack.remove_screen(id);
        harness.frame(0.1);
        assert_eq!(harness.stack.len(), 0);
        assert_eq!(harness.renderer.unloaded.len(), 1);
    }

    #[test]
    fn test_activation_failure_propagates() {
        let mut harness = Harness::new();
        harness.renderer = RecordingRenderer::new(800, 480).with_missing("Logos/missing");
        let (mut broken, _) = SpyScreen::new(0.0, 0.0);
        broken.texture_name = Some("Logos/missing");
        let (fine, _) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(broken), None);
        harness.stack.add_screen(Box::new(fine), None);

        let result = harness.stack.update(
            &harness.input,
            0.1,
            &mut harness.settings,
            &mut harness.renderer,
        );
        assert!(matches!(result, Err(AssetError::NotFound { .. })));
        assert_eq!(harness.stack.len(), 0);

        // The screen queued after the failure is still applied
        harness.frame(0.1);
        assert_eq!(harness.stack.len(), 1);
    }

    #[test]
    fn test_draw_back_to_front_skips_hidden() {
        let mut harness = Harness::new();
        let (first, first_log) = SpyScreen::new(0.0, 0.0);
        let (second, second_log) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(first), None);
        harness.stack.add_screen(Box::new(second), None);
        harness.frame(0.1);
        harness.stack.draw(&mut harness.renderer).unwrap();

        assert_eq!(first_log.borrow().draws, 1);
        assert_eq!(second_log.borrow().draws, 1);
    }

    #[test]
    fn test_wants_cursor_follows_top_screen() {
        let mut harness = Harness::new();
        let (mut menu, _) = SpyScreen::new(0.0, 0.0);
        menu.cursor = true;
        let (overlay, _) = SpyScreen::new(0.0, 0.0);

        harness.stack.add_screen(Box::new(menu), None);
        harness.frame(0.1);
        assert!(harness.stack.wants_cursor());

        harness.stack.add_screen(Box::new(overlay), None);
        harness.frame(0.1);
        assert!(!harness.stack.wants_cursor());
    }

    #[test]
    fn test_screens_snapshot_is_a_copy() {
        let mut harness = Harness::new();
        let (screen, _) = SpyScreen::new(0.0, 0.0);
        harness.stack.add_screen(Box::new(screen), None);
        harness.frame(0.1);

        let snapshot = harness.stack.screens();
        harness.stack.clear(&mut harness.renderer);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "spy");
        assert!(harness.stack.is_empty());
    }
}

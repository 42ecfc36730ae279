//! Base Menu Component
//!
//! [`MenuScreen`] is the shared core of every menu: an ordered list of
//! [`MenuEntry`] lines, wraparound keyboard/gamepad navigation that skips
//! spacer entries, mouse hover, and selection reported as a
//! [`NavigationOutcome`] for the owning screen to act on.
//!
//! Concrete menus embed a `MenuScreen`, forward `update`/`draw` to it and
//! match on the outcome of `handle_input`.

use super::MenuEntry;
use crate::input::{
    Buttons, InputAction, InputSnapshot, MouseButtons, PlayerIndex, TouchPhase,
};
use crate::render::{with_alpha, Renderer, Viewport};
use crate::screen::{ScreenBase, ScreenState};
use crate::shape::{square_around, Shape};
use crate::text::{BitmapFont, MENU_FONT};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;

/// Vertical position of the first entry
const FIRST_ENTRY_Y: f32 = 175.0;

/// Vertical position of the title when fully on screen
const TITLE_Y: f32 = 150.0;

/// Side of the square hover box at scale 1.0
const HOVER_BOX_SIZE: f32 = 16.0;

/// Radius of a fingertip at scale 1.0
const TOUCH_RADIUS: f32 = 12.0;

/// Configuration for menu appearance
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Color for the title and for entries that leave the current context
    pub other_color: Color,

    /// Selected entry text color
    pub selected_color: Color,

    /// Text color of the entry under the mouse
    pub hover_color: Color,

    /// Title scale relative to the menu scale
    pub title_scale: f32,

    /// Darkening of screens under a popup (0.0 - 1.0)
    pub overlay_alpha: f32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            other_color: Color::RGB(219, 112, 147),
            selected_color: Color::YELLOW,
            hover_color: Color::RED,
            title_scale: 1.25,
            overlay_alpha: 2.0 / 3.0,
        }
    }
}

/// What a frame of menu input amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    None,
    /// The selected entry was chosen
    EntrySelected {
        index: usize,
        player: PlayerIndex,
    },
    /// The selected entry was chosen with the "previous value" binding
    EntrySelectedPrevious {
        index: usize,
        player: PlayerIndex,
    },
    Cancelled {
        player: PlayerIndex,
    },
}

/// The bindings a menu listens to
#[derive(Debug, Clone)]
struct MenuActions {
    up: InputAction,
    down: InputAction,
    select: InputAction,
    cancel: InputAction,
    select_previous: Option<InputAction>,
}

impl MenuActions {
    fn new() -> Self {
        MenuActions {
            up: InputAction::new(
                Buttons::DPAD_UP | Buttons::LEFT_THUMBSTICK_UP,
                &[Keycode::Up, Keycode::W],
                true,
            ),
            down: InputAction::new(
                Buttons::DPAD_DOWN | Buttons::LEFT_THUMBSTICK_DOWN,
                &[Keycode::Down, Keycode::S],
                true,
            ),
            select: select_action(),
            cancel: cancel_action(),
            select_previous: None,
        }
    }
}

/// Accept binding shared by menus and message boxes
pub fn select_action() -> InputAction {
    InputAction::new(
        Buttons::A | Buttons::START,
        &[Keycode::Return, Keycode::Space],
        true,
    )
    .with_mouse_buttons(MouseButtons::LEFT)
}

/// Back-out binding shared by menus and message boxes
pub fn cancel_action() -> InputAction {
    InputAction::new(Buttons::B | Buttons::BACK, &[Keycode::Escape], true)
}

/// Binding for stepping a value backwards in menus that offer it
pub fn select_previous_action() -> InputAction {
    InputAction::new(
        Buttons::DPAD_LEFT | Buttons::LEFT_THUMBSTICK_LEFT,
        &[Keycode::Left],
        true,
    )
    .with_mouse_buttons(MouseButtons::RIGHT)
}

/// A titled, navigable list of menu entries
pub struct MenuScreen {
    base: ScreenBase,
    title: String,
    entries: Vec<MenuEntry>,
    selected_entry: usize,
    scale: f32,
    style: MenuStyle,
    actions: MenuActions,
    font: BitmapFont,
    viewport: Viewport,
    /// Running time in seconds, drives the selection pulse
    time: f32,
}

impl MenuScreen {
    /// Creates a menu with a 0.5 s transition each way.
    ///
    /// The first non-blank entry starts selected.
    ///
    /// # Panics
    ///
    /// If `entries` is non-empty but every entry is a spacer.
    pub fn new(title: impl Into<String>, entries: Vec<MenuEntry>, scale: f32) -> Self {
        assert!(
            entries.is_empty() || entries.iter().any(|entry| !entry.is_blank()),
            "menu entries must include at least one selectable entry"
        );

        let selected_entry = entries
            .iter()
            .position(|entry| !entry.is_blank())
            .unwrap_or(0);

        MenuScreen {
            base: ScreenBase::new(0.5, 0.5),
            title: title.into(),
            entries,
            selected_entry,
            scale,
            style: MenuStyle::default(),
            actions: MenuActions::new(),
            font: MENU_FONT,
            viewport: Viewport::new(0, 0),
            time: 0.0,
        }
    }

    /// Marks the menu as a popup over the screens beneath
    pub fn popup(mut self) -> Self {
        self.base = self.base.popup();
        self
    }

    /// Also listen for the "previous value" binding
    pub fn with_select_previous(mut self) -> Self {
        self.actions.select_previous = Some(select_previous_action());
        self
    }

    pub fn base(&self) -> &ScreenBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut MenuEntry> {
        self.entries.get_mut(index)
    }

    #[cfg(test)]
    pub fn selected_entry(&self) -> usize {
        self.selected_entry
    }

    pub fn font(&self) -> &BitmapFont {
        &self.font
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Rescales the menu and every entry
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        for entry in &mut self.entries {
            entry.set_scale(scale);
        }
    }

    /// Reads this frame's navigation input for the controlling player
    pub fn handle_input(&mut self, input: &InputSnapshot) -> NavigationOutcome {
        let controlling = self.base.controlling_player();

        self.scan_hover(input);

        if let Some(index) = self.touched_entry(input) {
            self.selected_entry = index;
            return NavigationOutcome::EntrySelected {
                index,
                player: controlling.unwrap_or(PlayerIndex::One),
            };
        }

        if self.actions.up.evaluate(input, controlling).is_some() {
            self.move_selection(false);
        }
        if self.actions.down.evaluate(input, controlling).is_some() {
            self.move_selection(true);
        }

        if let Some(player) = self.actions.select.evaluate(input, controlling) {
            return NavigationOutcome::EntrySelected {
                index: self.selected_entry,
                player,
            };
        }
        if let Some(player) = self.actions.cancel.evaluate(input, controlling) {
            return NavigationOutcome::Cancelled { player };
        }
        if let Some(player) = self
            .actions
            .select_previous
            .as_ref()
            .and_then(|action| action.evaluate(input, controlling))
        {
            return NavigationOutcome::EntrySelectedPrevious {
                index: self.selected_entry,
                player,
            };
        }

        NavigationOutcome::None
    }

    /// Marks the first entry under the cursor as hovered, clearing the rest
    fn scan_hover(&mut self, input: &InputSnapshot) {
        for entry in &mut self.entries {
            entry.set_hovering(false);
        }

        if !input.cursor_is_valid() {
            return;
        }

        let hover_box = Shape::Rectangle(square_around(
            input.cursor(),
            HOVER_BOX_SIZE * self.scale,
        ));

        let font = self.font;
        if let Some(entry) = self.entries.iter_mut().find(|entry| {
            entry
                .bounds(&font)
                .is_some_and(|bounds| Shape::Rectangle(bounds).intersects(&hover_box))
        }) {
            entry.set_hovering(true);
        }
    }

    /// First entry under a finger that went down this frame
    fn touched_entry(&self, input: &InputSnapshot) -> Option<usize> {
        let radius = TOUCH_RADIUS * self.scale;

        input
            .touches()
            .iter()
            .filter(|touch| touch.phase == TouchPhase::Pressed)
            .find_map(|touch| {
                let finger = Shape::Circle {
                    center: (touch.x, touch.y),
                    radius,
                };
                self.entries.iter().position(|entry| {
                    entry
                        .bounds(&self.font)
                        .is_some_and(|bounds| finger.intersects(&Shape::Rectangle(bounds)))
                })
            })
    }

    /// Steps the selection one entry, wrapping at both ends and skipping spacers
    fn move_selection(&mut self, forward: bool) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }

        let mut index = self.selected_entry;
        for _ in 0..count {
            index = if forward {
                (index + 1) % count
            } else {
                (index + count - 1) % count
            };
            if !self.entries[index].is_blank() {
                self.selected_entry = index;
                return;
            }
        }
    }

    /// Advances the transition, lays out entries and eases their fades.
    ///
    /// A hovered entry becomes the selection.
    pub fn update(
        &mut self,
        viewport: Viewport,
        elapsed: f32,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.base
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);
        self.viewport = viewport;
        self.time += elapsed;

        self.update_entry_locations();

        let is_active = self.base.is_active();
        if !is_active {
            for entry in &mut self.entries {
                entry.set_hovering(false);
            }
        }

        if let Some(hovered) = self.entries.iter().position(MenuEntry::is_hovering) {
            self.selected_entry = hovered;
        }

        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.update(is_active && i == self.selected_entry, elapsed);
        }
    }

    /// Stacks entries downwards, centered, sliding them with the transition
    fn update_entry_locations(&mut self) {
        let offset = self.base.transition_position().powi(2);
        let sliding_on = self.base.state() == ScreenState::TransitionOn;
        let center_x = self.viewport.width as f32 / 2.0;
        let font = self.font;

        let mut y = FIRST_ENTRY_Y;
        for entry in &mut self.entries {
            let mut x = center_x - entry.width(&font) / 2.0;

            if sliding_on {
                x -= offset * 256.0;
            } else {
                x += offset * 512.0;
            }

            entry.set_position((x, y));
            y += entry.height(&font);
        }
    }

    /// Draws the title and every entry, faded by the transition
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), String> {
        let alpha = self.base.transition_alpha();

        for (i, entry) in self.entries.iter().enumerate() {
            let is_selected = self.base.is_active() && i == self.selected_entry;
            entry.draw(renderer, &self.font, &self.style, is_selected, self.time, alpha)?;
        }

        let offset = self.base.transition_position().powi(2);
        let title_position = (
            self.viewport.width as f32 / 2.0,
            TITLE_Y - offset * 100.0,
        );
        let (title_width, title_height) = self.font.measure(&self.title);

        renderer.draw_text(
            &self.font,
            &self.title,
            title_position,
            (title_width / 2.0, title_height / 2.0),
            self.style.title_scale * self.scale,
            with_alpha(self.style.other_color, alpha),
        )
    }
}

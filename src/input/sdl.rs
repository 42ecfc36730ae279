use super::devices::{
    Buttons, GamePadState, InputSource, KeyboardState, MouseButtons, MouseState, TouchPhase,
    TouchPoint,
};
use super::{PlayerIndex, MAX_INPUTS};
use crate::render::Viewport;
use sdl2::controller::{Axis, Button, GameController};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseUtil;
use sdl2::video::Window;
use sdl2::{EventPump, GameControllerSubsystem};

/// Events the host loop reacts to directly
///
/// Everything else SDL reports is folded into device state and read through
/// the [`InputSource`] trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Quit,
    FocusGained,
    FocusLost,
}

/// SDL2 device backend
///
/// Translates the SDL event stream and device polling into per-slot readings.
/// SDL exposes a single keyboard and mouse, so every player slot sees the same
/// keyboard and mouse state. A connecting controller takes the first free
/// slot and keeps it until it disconnects.
///
/// # Frame protocol
///
/// 1. `poll_events()` drains the event pump and latches keyboard/mouse state
/// 2. `InputSnapshot::refresh()` reads this backend through `InputSource`
/// 3. `apply_mouse_warp()` moves the OS pointer if the cursor was stick-driven
pub struct SdlInput {
    controller_subsystem: GameControllerSubsystem,
    /// One pad per player slot; a pad keeps its slot until it disconnects
    controllers: [Option<GameController>; MAX_INPUTS],
    keyboard: KeyboardState,
    mouse: MouseState,
    touches: Vec<TouchPoint>,
    viewport: Viewport,
    pending_warp: Option<(i32, i32)>,
}

impl SdlInput {
    pub fn new(controller_subsystem: GameControllerSubsystem, viewport: Viewport) -> Self {
        SdlInput {
            controller_subsystem,
            controllers: Default::default(),
            keyboard: KeyboardState::default(),
            mouse: MouseState::default(),
            touches: Vec::new(),
            viewport,
            pending_warp: None,
        }
    }

    /// Touch coordinates are normalised by SDL; this keeps the scale current.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Drains pending SDL events and returns the ones the host handles
    ///
    /// Also samples the keyboard and mouse so the next `refresh` sees a
    /// consistent reading for the whole frame.
    pub fn poll_events(&mut self, event_pump: &mut EventPump) -> Vec<HostEvent> {
        let mut host_events = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => {
                    host_events.push(HostEvent::Quit);
                }
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => host_events.push(HostEvent::FocusGained),
                    WindowEvent::FocusLost => host_events.push(HostEvent::FocusLost),
                    _ => {}
                },
                Event::ControllerDeviceAdded { which, .. } => {
                    self.handle_controller_added(which);
                }
                Event::ControllerDeviceRemoved { which, .. } => {
                    self.handle_controller_removed(which);
                }
                Event::FingerDown {
                    finger_id, x, y, ..
                } => {
                    self.touches
                        .push(touch_point(finger_id, x, y, TouchPhase::Pressed, self.viewport));
                }
                Event::FingerMotion {
                    finger_id, x, y, ..
                } => {
                    self.touches
                        .push(touch_point(finger_id, x, y, TouchPhase::Moved, self.viewport));
                }
                Event::FingerUp {
                    finger_id, x, y, ..
                } => {
                    self.touches
                        .push(touch_point(finger_id, x, y, TouchPhase::Released, self.viewport));
                }
                _ => {
                    // Keyboard and mouse are sampled below
                }
            }
        }

        self.keyboard = KeyboardState::new(
            event_pump
                .keyboard_state()
                .pressed_scancodes()
                .filter_map(Keycode::from_scancode),
        );

        let mouse = event_pump.mouse_state();
        let mut buttons = MouseButtons::empty();
        buttons.set(MouseButtons::LEFT, mouse.left());
        buttons.set(MouseButtons::MIDDLE, mouse.middle());
        buttons.set(MouseButtons::RIGHT, mouse.right());
        buttons.set(MouseButtons::X1, mouse.x1());
        buttons.set(MouseButtons::X2, mouse.x2());
        self.mouse = MouseState {
            x: mouse.x(),
            y: mouse.y(),
            buttons,
        };

        host_events
    }

    fn handle_controller_added(&mut self, joystick_index: u32) {
        let Some(slot) = free_slot(&self.controllers) else {
            log::warn!(
                "Ignoring controller {}: all {} player slots are taken",
                joystick_index,
                MAX_INPUTS
            );
            return;
        };
        if !self.controller_subsystem.is_game_controller(joystick_index) {
            return;
        }

        match self.controller_subsystem.open(joystick_index) {
            Ok(controller) => {
                if self
                    .controllers
                    .iter()
                    .flatten()
                    .any(|c| c.instance_id() == controller.instance_id())
                {
                    return;
                }
                log::debug!(
                    "Controller \"{}\" assigned to player {}",
                    controller.name(),
                    slot + 1
                );
                self.controllers[slot] = Some(controller);
            }
            Err(e) => {
                log::warn!("Failed to open controller {}: {}", joystick_index, e);
            }
        }
    }

    fn handle_controller_removed(&mut self, instance_id: u32) {
        let released = release_slot(&mut self.controllers, |c| c.instance_id() == instance_id);
        if let Some(slot) = released {
            log::debug!("Controller {} disconnected from player {}", instance_id, slot + 1);
        }
    }

    /// Moves the OS pointer to the last position requested through
    /// `InputSource::set_mouse_position`.
    pub fn apply_mouse_warp(&mut self, mouse: &MouseUtil, window: &Window) {
        if let Some((x, y)) = self.pending_warp.take() {
            mouse.warp_mouse_in_window(window, x, y);
        }
    }
}

impl InputSource for SdlInput {
    fn keyboard(&self, _player: PlayerIndex) -> KeyboardState {
        self.keyboard.clone()
    }

    fn gamepad(&self, player: PlayerIndex) -> GamePadState {
        match &self.controllers[player.index()] {
            Some(controller) => read_controller(controller),
            None => GamePadState::default(),
        }
    }

    fn mouse(&self, _player: PlayerIndex) -> MouseState {
        self.mouse
    }

    fn take_touches(&mut self) -> Vec<TouchPoint> {
        std::mem::take(&mut self.touches)
    }

    fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.pending_warp = Some((x, y));
    }
}

/// First player slot with no pad in it
fn free_slot<T>(slots: &[Option<T>]) -> Option<usize> {
    slots.iter().position(Option::is_none)
}

/// Empties the slot whose pad matches, leaving every other slot alone
fn release_slot<T>(slots: &mut [Option<T>], matches: impl Fn(&T) -> bool) -> Option<usize> {
    let slot = slots
        .iter()
        .position(|pad| pad.as_ref().is_some_and(&matches))?;
    slots[slot] = None;
    Some(slot)
}

const BUTTON_MAP: [(Button, Buttons); 14] = [
    (Button::A, Buttons::A),
    (Button::B, Buttons::B),
    (Button::X, Buttons::X),
    (Button::Y, Buttons::Y),
    (Button::Back, Buttons::BACK),
    (Button::Start, Buttons::START),
    (Button::LeftShoulder, Buttons::LEFT_SHOULDER),
    (Button::RightShoulder, Buttons::RIGHT_SHOULDER),
    (Button::LeftStick, Buttons::LEFT_STICK),
    (Button::RightStick, Buttons::RIGHT_STICK),
    (Button::DPadUp, Buttons::DPAD_UP),
    (Button::DPadDown, Buttons::DPAD_DOWN),
    (Button::DPadLeft, Buttons::DPAD_LEFT),
    (Button::DPadRight, Buttons::DPAD_RIGHT),
];

fn read_controller(controller: &GameController) -> GamePadState {
    let mut buttons = Buttons::empty();
    for (sdl_button, button) in BUTTON_MAP {
        buttons.set(button, controller.button(sdl_button));
    }

    // SDL sticks are y-down; pad state is y-up
    let left_stick = (
        normalize_axis(controller.axis(Axis::LeftX)),
        -normalize_axis(controller.axis(Axis::LeftY)),
    );
    let right_stick = (
        normalize_axis(controller.axis(Axis::RightX)),
        -normalize_axis(controller.axis(Axis::RightY)),
    );

    GamePadState::new(
        left_stick,
        right_stick,
        normalize_axis(controller.axis(Axis::TriggerLeft)),
        normalize_axis(controller.axis(Axis::TriggerRight)),
        buttons,
    )
}

/// Deflections smaller than this read as zero, so a resting stick doesn't
/// steal the cursor from the mouse.
const AXIS_DEAD_ZONE: i16 = 8000;

fn normalize_axis(value: i16) -> f32 {
    if value.unsigned_abs() < AXIS_DEAD_ZONE as u16 {
        return 0.0;
    }
    (value as f32 / i16::MAX as f32).clamp(-1.0, 1.0)
}

/// Converts SDL's normalised touch coordinates into window pixels.
fn touch_point(id: i64, x: f32, y: f32, phase: TouchPhase, viewport: Viewport) -> TouchPoint {
    TouchPoint {
        id,
        x: x * viewport.width as f32,
        y: y * viewport.height as f32,
        phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(0), 0.0);
        assert_eq!(normalize_axis(4000), 0.0);
        assert_eq!(normalize_axis(i16::MAX), 1.0);
        assert_eq!(normalize_axis(i16::MIN), -1.0);
        assert!((normalize_axis(16384) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_touch_point_scales_to_viewport() {
        let point = touch_point(7, 0.5, 0.25, TouchPhase::Moved, Viewport::new(800, 480));
        assert_eq!(point.id, 7);
        assert_eq!(point.x, 400.0);
        assert_eq!(point.y, 120.0);
        assert_eq!(point.phase, TouchPhase::Moved);
    }

    #[test]
    fn test_unplugging_keeps_other_slots() {
        let mut slots: [Option<u32>; MAX_INPUTS] = [None; MAX_INPUTS];
        for id in [10, 11, 12] {
            let slot = free_slot(&slots).unwrap();
            slots[slot] = Some(id);
        }

        assert_eq!(release_slot(&mut slots, |&id| id == 10), Some(0));
        assert_eq!(slots, [None, Some(11), Some(12), None]);

        // A new pad fills the gap rather than the end
        assert_eq!(free_slot(&slots), Some(0));
        slots[0] = Some(13);
        assert_eq!(slots, [Some(13), Some(11), Some(12), None]);
    }

    #[test]
    fn test_release_unknown_pad_changes_nothing() {
        let mut slots = [Some(1u32), None, Some(3), None];
        assert_eq!(release_slot(&mut slots, |&id| id == 2), None);
        assert_eq!(slots, [Some(1), None, Some(3), None]);
    }

    #[test]
    fn test_no_free_slot_when_full() {
        let slots = [Some(1u32), Some(2), Some(3), Some(4)];
        assert_eq!(free_slot(&slots), None);
    }

    #[test]
    fn test_button_map_has_distinct_flags() {
        let mut seen = Buttons::empty();
        for (_, button) in BUTTON_MAP {
            assert!(!seen.intersects(button));
            seen |= button;
        }
    }
}

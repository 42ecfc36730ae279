//! Screen transition state machine
//!
//! Position runs from 1.0 (fully hidden) to 0.0 (fully shown). Entering drives
//! it toward 0, exiting or being covered drives it toward 1.
//!
//! ```text
//!  TransitionOn ──► Active ──exit()──► TransitionOff ──► Hidden (removable)
//!        ▲             │
//!        └─ uncovered ─┴─ covered ──► TransitionOff (paused at 1.0)
//! ```

/// Where a screen is in its transition lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    TransitionOn,
    Active,
    TransitionOff,
    Hidden,
}

/// Timed transition between hidden and shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    on_time: f32,
    off_time: f32,
    position: f32,
    state: ScreenState,
    is_exiting: bool,
    /// Seconds spent exiting; a screen may not hide before `off_time` has passed
    exit_elapsed: f32,
}

impl Transition {
    /// Creates a transition that starts fully hidden and entering.
    ///
    /// Durations are in seconds; negative values are treated as zero.
    pub fn new(on_time: f32, off_time: f32) -> Self {
        Transition {
            on_time: on_time.max(0.0),
            off_time: off_time.max(0.0),
            position: 1.0,
            state: ScreenState::TransitionOn,
            is_exiting: false,
            exit_elapsed: 0.0,
        }
    }

    /// Advances the transition by `elapsed` seconds
    ///
    /// An exiting screen moves toward hidden and becomes `Hidden` once fully
    /// off and at least `off_time` has passed since `exit()`. A covered screen
    /// moves toward hidden but stays `TransitionOff`. Otherwise the screen
    /// moves toward shown and becomes `Active` on arrival.
    pub fn update(&mut self, elapsed: f32, covered_by_other_screen: bool) -> ScreenState {
        let elapsed = elapsed.max(0.0);

        if self.is_exiting {
            if self.state == ScreenState::Hidden {
                return self.state;
            }
            self.exit_elapsed += elapsed;
            let moving = self.step(elapsed, self.off_time, 1.0);
            self.state = if !moving && self.exit_elapsed >= self.off_time {
                ScreenState::Hidden
            } else {
                ScreenState::TransitionOff
            };
        } else if covered_by_other_screen {
            self.step(elapsed, self.off_time, 1.0);
            self.state = ScreenState::TransitionOff;
        } else {
            let moving = self.step(elapsed, self.on_time, -1.0);
            self.state = if moving {
                ScreenState::TransitionOn
            } else {
                ScreenState::Active
            };
        }

        self.state
    }

    /// Moves the position toward the end given by `direction`.
    ///
    /// Returns `true` while still in transit, `false` once the end is reached.
    fn step(&mut self, elapsed: f32, duration: f32, direction: f32) -> bool {
        let delta = if duration <= 0.0 {
            1.0
        } else {
            elapsed / duration
        };

        self.position = (self.position + delta * direction).clamp(0.0, 1.0);

        if direction < 0.0 {
            self.position > 0.0
        } else {
            self.position < 1.0
        }
    }

    /// Starts exiting
    ///
    /// With a zero off duration the screen is hidden immediately.
    pub fn exit(&mut self) {
        if self.is_exiting {
            return;
        }
        self.is_exiting = true;
        self.exit_elapsed = 0.0;

        if self.off_time <= 0.0 {
            self.position = 1.0;
            self.state = ScreenState::Hidden;
        } else {
            self.state = ScreenState::TransitionOff;
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Opacity for drawing: 1.0 fully shown, 0.0 fully hidden
    pub fn alpha(&self) -> f32 {
        1.0 - self.position
    }

    #[cfg(test)]
    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    /// Finished exiting; the stack may prune it
    pub fn is_removable(&self) -> bool {
        self.is_exiting && self.state == ScreenState::Hidden
    }
}

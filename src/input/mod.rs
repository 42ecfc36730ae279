//! Input handling
//!
//! Raw device readings are captured once per frame into an [`InputSnapshot`];
//! menus query it through [`InputAction`] bindings rather than individual keys.
//!
//! # Module Organization
//!
//! - `devices`: per-device state types and the [`InputSource`] trait
//! - `snapshot`: current/previous frame capture, cursor and virtual stick
//! - `action`: debounced multi-device bindings
//! - `sdl`: SDL2 event pump backend

pub mod action;
pub mod devices;
pub mod sdl;
pub mod snapshot;

pub use action::InputAction;
pub use devices::{Buttons, MouseButtons, TouchPhase};
pub use sdl::{HostEvent, SdlInput};
pub use snapshot::InputSnapshot;

/// Number of player slots tracked by the snapshot
pub const MAX_INPUTS: usize = 4;

/// A player slot
///
/// `None` in an `Option<PlayerIndex>` selector means "any player".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerIndex {
    One,
    Two,
    Three,
    Four,
}

impl PlayerIndex {
    /// All slots, in evaluation order
    pub const ALL: [PlayerIndex; MAX_INPUTS] = [
        PlayerIndex::One,
        PlayerIndex::Two,
        PlayerIndex::Three,
        PlayerIndex::Four,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Selects the slots a query should look at: just the controlling player,
/// or every slot in order when nobody is controlling.
pub(crate) fn candidate_players(
    controlling: Option<PlayerIndex>,
) -> impl Iterator<Item = PlayerIndex> {
    PlayerIndex::ALL
        .into_iter()
        .filter(move |player| controlling.is_none_or(|c| c == *player))
}

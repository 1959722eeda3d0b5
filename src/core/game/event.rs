//=========================================================================
// Game Events
//=========================================================================
//
// Messages that drive the session state machine. Pointer capture zones
// carry one of these as their target, so a resolved tap is already an
// explicit event by the time it reaches the game.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::GameLoopKey;

/// Stable index of a difference within the level, in definition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// Player intent resolved from a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// A difference's capture zone was tapped.
    RegionTapped(RegionId),
    /// The results screen's retry button was tapped.
    Retry,
    /// The results screen's share button was tapped.
    Share,
}

/// Per-frame loops the game registers with the scene manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameLoop {
    /// Score/timer refresh and win check while playing.
    Gameplay,
}

impl GameLoopKey for GameLoop {}

//=========================================================================
// Input System
//=========================================================================
//
// Turns batched platform input into the ordered list of taps the game
// should resolve this tick.
//
// Architecture:
//   Vec<Vec<InputEvent>> → InputSystem::process_frame() → PointerTracker
//                                                          ↓
//                                                   taps: Vec<Point>
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod pointer_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, PointerButton};
pub use pointer_tracker::PointerTracker;

//=== Internal Imports ====================================================

use log::trace;

use crate::core::scene::Point;

//=== InputSystem =========================================================

/// Owns the pointer tracker and feeds it one frame at a time.
pub struct InputSystem {
    tracker: PointerTracker,
}

impl InputSystem {
    pub fn new() -> Self {
        Self {
            tracker: PointerTracker::new(),
        }
    }

    /// Digests every batch received this frame and returns the taps,
    /// oldest first.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) -> Vec<Point> {
        self.tracker.clear();
        for batch in batches {
            self.tracker.process_events(batch);
        }

        let taps = self.tracker.take_taps();
        if !taps.is_empty() {
            trace!(target: "input", "{} tap(s) this frame", taps.len());
        }
        taps
    }

    /// Read access to the underlying pointer state.
    pub fn pointer(&self) -> &PointerTracker {
        &self.tracker
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

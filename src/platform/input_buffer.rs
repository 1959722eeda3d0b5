//=========================================================================
// Input Buffer
//=========================================================================
//
// Holds pointer input between two redraws.
//
//   discrete:   presses/releases, arrival order, consecutive duplicates
//               dropped
//   continuous: latest pointer move only (moves hash and compare equal)
//
// `drain()` hands both out at the frame boundary and leaves the buffer
// empty with its capacity intact.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Events ------------------------------------------------

    /// Stores a pointer move, replacing any earlier one.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Events --------------------------------------------------

    /// Appends a press or release unless it repeats the previous event.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's events, or `None` if nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Global Context
//=========================================================================
//
// Shared per-tick data: the message bus and this tick's raw input.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::message_bus::MessageBus;

//=== GlobalContext =======================================================

/// Data the systems read and write during one tick.
///
/// - `message_bus`: audio cues and share requests raised by the game
/// - `frame_input_events`: batches collected from the platform channel
pub struct GlobalContext {
    /// Typed queues drained by the audio and share systems each tick.
    pub message_bus: MessageBus,

    /// Input batches for the current tick, consumed by the input system.
    pub(crate) frame_input_events: Vec<Vec<InputEvent>>,
}

impl GlobalContext {
    pub(crate) fn new() -> Self {
        Self {
            message_bus: MessageBus::new(),
            frame_input_events: Vec::new(),
        }
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// The platform thread only ever sends `PlatformEvent`s; everything the
// game sees of the window arrives through this one enum.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the bounded channel.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Pointer input buffered since the previous redraw.
    ///
    /// `discrete` holds presses and releases in arrival order; `continuous`
    /// holds at most the latest pointer move.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Window and event loop failures. Payloads are rendered messages so the
/// error stays `Send + Sync` across the engine boundary.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(String),
}

//=========================================================================
// Unit Tests
//=========================================================================

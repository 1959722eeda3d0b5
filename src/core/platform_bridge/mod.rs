//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform layer and the core thread.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side draining of the channel, once per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::{PlatformError, PlatformEvent};

//=========================================================================
// Message Bus
//=========================================================================
//
// Typed, per-tick message passing between the game state machine and the
// systems around it (pointer dispatch, audio, share).
//
//=========================================================================

mod message_bus;
mod message_queue;

pub use message_bus::{Message, MessageBus};

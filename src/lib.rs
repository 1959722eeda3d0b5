//=========================================================================
// Spot the Difference - Library Root
//
// A tap-to-find game on a fixed-rate scene and game-loop runtime.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the game core (`core`) for embedding and testing
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use spot_diff::EngineBuilder;
//
// fn main() -> Result<(), spot_diff::GameError> {
//     EngineBuilder::new().build()?.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene manager, game state machine, input, message bus
// and collaborators. `config` and `error` are the ambient layers.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit window and input capture; `engine` wires it to
// the core thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::config::GameConfig;
pub use crate::core::platform_bridge::{PlatformError, PlatformEvent};
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::{AssetError, ConfigError, GameError};

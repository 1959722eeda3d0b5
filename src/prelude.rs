//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use spot_diff::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine and configuration
pub use crate::config::GameConfig;
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::GameError;

// Game
pub use crate::core::game::{Game, GameEvent, GameState, HitRegionSet, RegionId, Session};

// Scene system
pub use crate::core::scene::{Node, Point, Rect, RenderSurface, SceneManager, Stage};

// Collaborators
pub use crate::core::audio::{AudioCue, AudioPlayer};
pub use crate::core::share::{ShareRequest, ShareTarget};

// Message bus
pub use crate::core::message_bus::MessageBus;

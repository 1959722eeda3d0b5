//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle, per-frame game loops and the display model they act on.
//
// Architecture:
//   SceneManager<R, L>
//     ├─ surface: R (RenderSurface, default: Stage)
//     ├─ scenes: Vec<SceneId>
//     └─ game_loops: Vec<L>
//
// Flow:
//   tick → run_game_loops() → owner dispatches each loop key
//
//=========================================================================

//=== Module Declarations =================================================

pub mod display;
mod scene_manager;

//=== Public API ==========================================================

pub use display::{
    Color, HitArea, Node, NodeId, Point, Rect, RenderSurface, SceneId, Stage, TextStyle,
};
pub use scene_manager::{GameLoopKey, SceneManager};

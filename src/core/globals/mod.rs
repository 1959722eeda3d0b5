//=========================================================================
// Global State
//=========================================================================
//
// Separates systems (logic components) from context (shared data).
//
// Architecture:
//   GlobalSystems: InputSystem + Game + AudioSystem + ShareSystem
//   GlobalContext: MessageBus + this tick's input batches
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use global_systems::GlobalSystems;

//=========================================================================
// Game
//=========================================================================
//
// Spot-the-difference rules on top of the scene manager.
//
//   event      - GameEvent, RegionId, GameLoop keys
//   session    - score + tick-driven timer value
//   hit_region - regions, capture zones and found markers
//   button     - labelled tappable panel
//   scenes     - gameplay and results scene content
//   state      - Playing / Complete state machine
//
//=========================================================================

mod button;
mod event;
mod hit_region;
mod scenes;
mod session;
mod state;
mod timer;

pub use button::{Button, PlacedButton};
pub use event::{GameEvent, GameLoop, RegionId};
pub use hit_region::{HitRegion, HitRegionSet, MarkerStyle, RegionStatus, TapOutcome};
pub use scenes::Hud;
pub use session::Session;
pub use state::{Complete, Game, GameState, Playing};
pub use timer::format_elapsed;

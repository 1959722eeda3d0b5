//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the root surface, the scenes attached to it and the per-frame
// game loops that run while a scene is active.
//
// Transition discipline:
//   remove_all_game_loops() → remove_all_scenes() → create + attach
//
// `begin_scene()` performs the whole sequence in one step, so a caller
// cannot attach a scene on top of a live one or leave a loop registered
// against a disposed scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::display::{RenderSurface, SceneId};

//=== Game Loop Key =======================================================

/// Marker trait for per-frame loop identifiers.
///
/// Loops are registered by key and dispatched by the owner of the
/// manager, so no closure ever captures scene state.
pub trait GameLoopKey: Copy + Eq + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Manages attached scenes and active per-frame loops.
pub struct SceneManager<R: RenderSurface, L: GameLoopKey> {
    surface: R,
    scenes: Vec<SceneId>,
    game_loops: Vec<L>,
    /// Bumped on every loop teardown; a running tick stops dispatching
    /// as soon as it observes a new generation.
    generation: u64,
}

impl<R: RenderSurface, L: GameLoopKey> SceneManager<R, L> {
    //--- Construction -----------------------------------------------------

    pub fn new(surface: R) -> Self {
        Self {
            surface,
            scenes: Vec::new(),
            game_loops: Vec::new(),
            generation: 0,
        }
    }

    //--- Scene Operations -------------------------------------------------

    /// Detaches and disposes every attached scene. No-op when empty.
    pub fn remove_all_scenes(&mut self) {
        if self.scenes.is_empty() {
            return;
        }
        debug!(target: "scene", "Removing {} scene(s)", self.scenes.len());
        for scene in self.scenes.drain(..) {
            self.surface.detach(scene);
        }
    }

    /// Tears down loops and scenes, then creates and attaches a fresh,
    /// empty scene.
    pub fn begin_scene(&mut self) -> SceneId {
        self.teardown();
        let scene = self.surface.create_container();
        self.attach_scene(scene);
        scene
    }

    /// Attaches an already-created container.
    ///
    /// Attaching over a live scene is a caller bug; the stale scene is
    /// torn down so that exactly one scene stays attached.
    pub fn attach_scene(&mut self, scene: SceneId) {
        if !self.scenes.is_empty() {
            warn!(
                target: "scene",
                "Attaching {:?} while {} scene(s) are live; tearing them down first",
                scene,
                self.scenes.len()
            );
            self.teardown();
        }
        self.surface.attach(scene);
        self.scenes.push(scene);
    }

    //--- Game Loop Operations ---------------------------------------------

    /// Registers a loop to run once per tick, after previously registered
    /// loops. Duplicates are not filtered.
    pub fn add_game_loop(&mut self, game_loop: L) {
        debug!(target: "scene", "Adding game loop {:?}", game_loop);
        self.game_loops.push(game_loop);
    }

    /// Unregisters every loop.
    pub fn remove_all_game_loops(&mut self) {
        if !self.game_loops.is_empty() {
            debug!(target: "scene", "Removing {} game loop(s)", self.game_loops.len());
        }
        self.game_loops.clear();
        self.generation += 1;
    }

    /// Removes all loops, then all scenes.
    pub fn teardown(&mut self) {
        self.remove_all_game_loops();
        self.remove_all_scenes();
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs every registered loop once, in registration order.
    ///
    /// `dispatch` receives the manager back so a loop can update its scene
    /// or trigger a transition. Once a loop tears the loops down, the
    /// remaining loops of this tick belonged to the old scene and are
    /// skipped. Returns the number of loops that ran.
    pub fn run_game_loops<F>(&mut self, mut dispatch: F) -> usize
    where
        F: FnMut(&mut Self, L),
    {
        let generation = self.generation;
        let scheduled = self.game_loops.clone();
        let mut ran = 0;

        for game_loop in scheduled {
            if self.generation != generation {
                debug!(target: "scene", "Loops torn down mid-tick, skipping {:?}", game_loop);
                break;
            }
            dispatch(self, game_loop);
            ran += 1;
        }

        ran
    }

    //--- Accessors --------------------------------------------------------

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    /// Attached scenes, in attach order.
    pub fn scenes(&self) -> &[SceneId] {
        &self.scenes
    }

    /// The most recently attached scene.
    pub fn active_scene(&self) -> Option<SceneId> {
        self.scenes.last().copied()
    }

    /// Registered loops, in registration order.
    pub fn game_loops(&self) -> &[L] {
        &self.game_loops
    }
}

//=== Tests ===============================================================

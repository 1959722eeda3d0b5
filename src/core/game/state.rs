//=========================================================================
// Game State Machine
//=========================================================================
//
// Two states, each owning everything its scene needs:
//
//   ┌──────────┐  score == total (on tick)   ┌──────────┐
//   │ Playing  │ ──────────────────────────> │ Complete │
//   └──────────┘ <────────────────────────── └──────────┘
//        ^               Retry tap
//        └── start
//
// Every transition goes through `SceneManager::begin_scene`, which tears
// down loops and scenes before the next state builds its own. Playing
// registers exactly one game loop; Complete registers none.
//
// Taps arrive as `GameEvent`s and are handled one at a time. The timer and
// the win check run in the gameplay loop, once per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::event::{GameEvent, GameLoop, RegionId};
use super::hit_region::{HitRegionSet, MarkerStyle, TapOutcome};
use super::scenes::{self, Hud};
use super::session::Session;
use crate::config::GameConfig;
use crate::core::audio::AudioCue;
use crate::core::message_bus::MessageBus;
use crate::core::scene::{Point, RenderSurface, SceneId, SceneManager};
use crate::core::share::ShareRequest;

//=== States ==============================================================

/// Gameplay: regions are tappable and the timer runs.
#[derive(Debug)]
pub struct Playing {
    session: Session,
    regions: HitRegionSet,
    scene: SceneId,
    hud: Hud,
}

/// Results: the session is frozen and only the buttons react.
#[derive(Debug)]
pub struct Complete {
    session: Session,
    scene: SceneId,
}

#[derive(Debug)]
pub enum GameState {
    Playing(Playing),
    Complete(Complete),
}

impl GameState {
    pub fn session(&self) -> Session {
        match self {
            GameState::Playing(p) => p.session,
            GameState::Complete(c) => c.session,
        }
    }

    pub fn scene(&self) -> SceneId {
        match self {
            GameState::Playing(p) => p.scene,
            GameState::Complete(c) => c.scene,
        }
    }
}

//=== Game ================================================================

/// The session state machine together with the scene manager it drives.
pub struct Game<R: RenderSurface> {
    manager: SceneManager<R, GameLoop>,
    state: GameState,
    config: GameConfig,
}

impl<R: RenderSurface> Game<R> {
    /// Starts a new game in the Playing state on `surface`.
    pub fn new(surface: R, config: GameConfig) -> Self {
        let mut manager = SceneManager::new(surface);
        let state = enter_playing(&mut manager, &config);
        Self {
            manager,
            state,
            config,
        }
    }

    //--- Events -----------------------------------------------------------

    /// Resolves a tap at `point` against the attached scene and handles the
    /// resulting event, if any.
    pub fn dispatch_tap(&mut self, point: Point, bus: &mut MessageBus) -> Option<GameEvent> {
        let Some(event) = self.manager.surface().hit_test(point) else {
            trace!(target: "game", "Tap at ({}, {}) hit nothing", point.x, point.y);
            return None;
        };
        self.handle_event(event, bus);
        Some(event)
    }

    /// Applies one event to the current state. Events that make no sense in
    /// the current state are ignored.
    pub fn handle_event(&mut self, event: GameEvent, bus: &mut MessageBus) {
        match (event, &mut self.state) {
            (GameEvent::RegionTapped(id), GameState::Playing(playing)) => {
                on_region_tapped(playing, id, self.manager.surface_mut(), bus);
                return;
            }
            (GameEvent::Share, GameState::Complete(complete)) => {
                bus.push(ShareRequest {
                    text: scenes::share_text(complete.session.elapsed_secs()),
                    url: self.config.share.game_url.clone(),
                });
                return;
            }
            _ => {}
        }

        if event == GameEvent::Retry && self.is_complete() {
            info!(target: "game", "Retrying");
            self.state = enter_playing(&mut self.manager, &self.config);
        } else {
            debug!(target: "game", "Ignoring {:?} in current state", event);
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Advances one frame by running every registered game loop.
    pub fn tick(&mut self, bus: &mut MessageBus) {
        let Game { manager, state, .. } = self;

        manager.run_game_loops(|manager, game_loop| match game_loop {
            GameLoop::Gameplay => gameplay_tick(manager, state, bus),
        });
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> Session {
        self.state.session()
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, GameState::Playing(_))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, GameState::Complete(_))
    }

    /// Regions of the running gameplay scene; `None` once complete.
    pub fn regions(&self) -> Option<&HitRegionSet> {
        match &self.state {
            GameState::Playing(p) => Some(&p.regions),
            GameState::Complete(_) => None,
        }
    }

    /// HUD text nodes of the running gameplay scene.
    pub fn hud(&self) -> Option<Hud> {
        match &self.state {
            GameState::Playing(p) => Some(p.hud),
            GameState::Complete(_) => None,
        }
    }

    pub fn manager(&self) -> &SceneManager<R, GameLoop> {
        &self.manager
    }

    pub fn surface(&self) -> &R {
        self.manager.surface()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

//=== Transitions =========================================================

fn enter_playing<R: RenderSurface>(
    manager: &mut SceneManager<R, GameLoop>,
    config: &GameConfig,
) -> GameState {
    let scene = manager.begin_scene();
    let regions = HitRegionSet::new(
        &config.region_centers(),
        config.level.hit_size,
        MarkerStyle::with_radius(config.level.marker_radius),
    );
    let session = Session::new(regions.len(), config.seconds_per_tick());
    let hud = scenes::build_gameplay(manager.surface_mut(), scene, config, &regions, &session);
    manager.add_game_loop(GameLoop::Gameplay);

    info!(target: "game", "Playing: {} difference(s) to find", regions.len());
    GameState::Playing(Playing {
        session,
        regions,
        scene,
        hud,
    })
}

fn enter_complete<R: RenderSurface>(
    manager: &mut SceneManager<R, GameLoop>,
    session: Session,
) -> GameState {
    let scene = manager.begin_scene();
    scenes::build_results(manager.surface_mut(), scene, session.elapsed_secs());

    info!(target: "game", "Complete in {} seconds", session.elapsed_label());
    GameState::Complete(Complete { session, scene })
}

//=== Handlers ============================================================

fn on_region_tapped<R: RenderSurface>(
    playing: &mut Playing,
    id: RegionId,
    surface: &mut R,
    bus: &mut MessageBus,
) {
    if playing.regions.on_tap(id, surface, playing.scene) == TapOutcome::Found {
        playing.session = playing.session.record_find();
        bus.push(AudioCue::Hit);
    }
}

fn gameplay_tick<R: RenderSurface>(
    manager: &mut SceneManager<R, GameLoop>,
    state: &mut GameState,
    bus: &mut MessageBus,
) {
    let GameState::Playing(playing) = state else {
        debug!(target: "game", "Gameplay loop ran outside Playing");
        return;
    };

    let surface = manager.surface_mut();
    surface.set_text(playing.hud.score, &scenes::score_text(&playing.session));
    playing.session = playing.session.advance();
    surface.set_text(playing.hud.timer, &scenes::timer_text(&playing.session));

    if playing.session.is_complete() {
        let session = playing.session;
        bus.push(AudioCue::Clear);
        *state = enter_complete(manager, session);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{Node, Stage};

    fn game() -> Game<Stage> {
        Game::new(Stage::new(400.0, 600.0), GameConfig::default())
    }

    fn tap_region(game: &mut Game<Stage>, index: usize, bus: &mut MessageBus) {
        let center = game.config().region_centers()[index];
        let event = game.dispatch_tap(center, bus);
        assert_eq!(event, Some(GameEvent::RegionTapped(RegionId(index))));
    }

    fn finish(game: &mut Game<Stage>, bus: &mut MessageBus) {
        for i in 0..3 {
            tap_region(game, i, bus);
        }
        game.tick(bus);
        assert!(game.is_complete());
    }

    fn assert_single_scene(game: &Game<Stage>, loops: usize) {
        assert_eq!(game.manager().scenes().len(), 1, "Exactly one scene attached");
        assert_eq!(game.surface().attached().len(), 1, "Surface agrees");
        assert_eq!(game.manager().game_loops().len(), loops);
    }

    #[test]
    fn starts_playing_with_one_loop() {
        let game = game();
        assert!(game.is_playing());
        assert_eq!(game.session().score(), 0);
        assert_eq!(game.session().ticks(), 0);
        assert_single_scene(&game, 1);
    }

    #[test]
    fn tapping_same_region_twice_scores_once() {
        let mut game = game();
        let mut bus = MessageBus::new();

        tap_region(&mut game, 0, &mut bus);
        tap_region(&mut game, 0, &mut bus);

        assert_eq!(game.session().score(), 1);
        assert_eq!(bus.drain::<AudioCue>(), vec![AudioCue::Hit], "Second tap is silent");
        let rings = game
            .surface()
            .nodes(game.state().scene())
            .filter(|n| matches!(n, Node::Ring { .. }))
            .count();
        assert_eq!(rings, 1);
    }

    #[test]
    fn tap_outside_regions_does_nothing() {
        let mut game = game();
        let mut bus = MessageBus::new();

        assert_eq!(game.dispatch_tap(Point::new(5.0, 590.0), &mut bus), None);
        assert_eq!(game.session().score(), 0);
        assert!(!bus.has_messages::<AudioCue>());
    }

    #[test]
    fn tick_updates_hud_texts() {
        let mut game = game();
        let mut bus = MessageBus::new();
        tap_region(&mut game, 1, &mut bus);

        for _ in 0..120 {
            game.tick(&mut bus);
        }

        let hud = game.hud().unwrap();
        assert_eq!(game.surface().text(hud.score), Some("Found: 1/3"));
        assert_eq!(game.surface().text(hud.timer), Some("Timer: 2.00"));
    }

    #[test]
    fn three_taps_complete_on_following_tick() {
        let mut game = game();
        let mut bus = MessageBus::new();

        for (i, expected) in [1, 2, 3].into_iter().enumerate() {
            tap_region(&mut game, i, &mut bus);
            assert_eq!(game.session().score(), expected);
            assert!(game.is_playing(), "Completion waits for the tick");
        }

        game.tick(&mut bus);

        assert!(game.is_complete());
        assert_eq!(game.session().score(), 3);
        assert_eq!(
            bus.drain::<AudioCue>(),
            vec![AudioCue::Hit, AudioCue::Hit, AudioCue::Hit, AudioCue::Clear]
        );
        assert_single_scene(&game, 0);
    }

    #[test]
    fn complete_freezes_elapsed_time() {
        let mut game = game();
        let mut bus = MessageBus::new();
        for _ in 0..59 {
            game.tick(&mut bus);
        }
        finish(&mut game, &mut bus);

        let frozen = game.session();
        assert_eq!(frozen.ticks(), 60, "Completing tick still counts");
        for _ in 0..30 {
            game.tick(&mut bus);
        }
        assert_eq!(game.session(), frozen);
        assert_eq!(frozen.elapsed_label(), "1.00");
    }

    #[test]
    fn tap_after_complete_is_ignored() {
        let mut game = game();
        let mut bus = MessageBus::new();
        finish(&mut game, &mut bus);
        bus.clear_all();

        let center = game.config().region_centers()[0];
        assert_eq!(game.dispatch_tap(center, &mut bus), None, "Zones were torn down");
        game.handle_event(GameEvent::RegionTapped(RegionId(0)), &mut bus);

        assert!(game.is_complete());
        assert_eq!(game.session().score_label(), "3/3");
        assert!(!bus.has_messages::<AudioCue>());
    }

    #[test]
    fn retry_restarts_fresh_session() {
        let mut game = game();
        let mut bus = MessageBus::new();
        for _ in 0..10 {
            game.tick(&mut bus);
        }
        finish(&mut game, &mut bus);

        assert_eq!(game.dispatch_tap(Point::new(60.0, 520.0), &mut bus), Some(GameEvent::Retry));

        assert!(game.is_playing());
        assert_eq!(game.session(), Session::new(3, 1.0 / 60.0));
        assert!(game.regions().unwrap().iter().all(|r| !r.is_found()));
        assert_single_scene(&game, 1);
        let hud = game.hud().unwrap();
        assert_eq!(game.surface().text(hud.timer), Some("Timer: 0.00"));
    }

    #[test]
    fn share_pushes_request_with_frozen_time() {
        let mut game = game();
        let mut bus = MessageBus::new();
        for _ in 0..119 {
            game.tick(&mut bus);
        }
        finish(&mut game, &mut bus);

        assert_eq!(game.dispatch_tap(Point::new(260.0, 520.0), &mut bus), Some(GameEvent::Share));

        assert_eq!(
            bus.drain::<ShareRequest>(),
            vec![ShareRequest {
                text: "2.00 seconds to spot all the differences!".into(),
                url: "https://machigae-game.web.app/".into(),
            }]
        );
        assert!(game.is_complete(), "Sharing does not leave the results screen");
    }

    #[test]
    fn retry_and_share_are_ignored_while_playing() {
        let mut game = game();
        let mut bus = MessageBus::new();

        game.handle_event(GameEvent::Share, &mut bus);
        game.handle_event(GameEvent::Retry, &mut bus);

        assert!(game.is_playing());
        assert!(!bus.has_messages::<ShareRequest>());
        assert_single_scene(&game, 1);
    }

    #[test]
    fn score_never_exceeds_total() {
        let mut game = game();
        let mut bus = MessageBus::new();
        for _ in 0..3 {
            for i in 0..3 {
                game.handle_event(GameEvent::RegionTapped(RegionId(i)), &mut bus);
                assert!(game.session().score() <= game.session().total());
            }
        }
        game.handle_event(GameEvent::RegionTapped(RegionId(7)), &mut bus);
        assert_eq!(game.session().score(), 3);
    }
}

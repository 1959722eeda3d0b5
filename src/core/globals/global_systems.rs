//=========================================================================
// Global Systems
//=========================================================================
//
// Systems updated once per tick, in a fixed order:
//
//   input → taps → game (hit-test + event) → game loops → audio → share
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::audio::AudioSystem;
use crate::core::game::Game;
use crate::core::input::InputSystem;
use crate::core::scene::RenderSurface;
use crate::core::share::ShareSystem;

//=== GlobalSystems =======================================================

/// Every system the core thread drives.
pub struct GlobalSystems<R: RenderSurface> {
    /// Turns raw pointer input into taps.
    pub input: InputSystem,

    /// Session state machine and the scene manager it owns.
    pub game: Game<R>,

    /// Plays queued audio cues.
    pub audio: AudioSystem,

    /// Opens queued share requests.
    pub share: ShareSystem,
}

impl<R: RenderSurface> GlobalSystems<R> {
    pub(crate) fn new(game: Game<R>, audio: AudioSystem, share: ShareSystem) -> Self {
        Self {
            input: InputSystem::new(),
            game,
            audio,
            share,
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: this tick's batches become an ordered list of taps
    /// 2. **Taps**: each tap is hit-tested and its event handled before
    ///    the next tap is resolved, so a tap that changes the scene is
    ///    seen by the taps after it
    /// 3. **Game loops**: every registered loop runs once
    /// 4. **Collaborators**: audio and share drain their messages
    pub(crate) fn update(&mut self, context: &mut GlobalContext) {
        // 1. Input
        let taps = self.input.process_frame(&context.frame_input_events);
        context.frame_input_events.clear();

        // 2. Taps, one at a time
        for tap in taps {
            if let Some(event) = self.game.dispatch_tap(tap, &mut context.message_bus) {
                trace!(target: "game", "Tap at ({}, {}) -> {:?}", tap.x, tap.y, event);
            }
        }

        // 3. Game loops
        self.game.tick(&mut context.message_bus);

        // 4. Collaborators
        self.audio.update(&mut context.message_bus);
        self.share.update(&mut context.message_bus);
        context.message_bus.clear_all();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::assets::{AssetCatalog, AssetId};
    use crate::core::audio::AudioPlayer;
    use crate::core::input::{InputEvent, PointerButton};
    use crate::core::scene::{Point, Stage};
    use crate::core::share::{ShareError, ShareRequest, ShareTarget};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingAudio(Arc<Mutex<Vec<AssetId>>>);

    impl AudioPlayer for RecordingAudio {
        fn play(&mut self, clip: AssetId, _path: &Path) {
            self.0.lock().unwrap().push(clip);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingShare(Arc<Mutex<Vec<ShareRequest>>>);

    impl ShareTarget for RecordingShare {
        fn open(&mut self, request: &ShareRequest) -> Result<(), ShareError> {
            self.0.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    struct Harness {
        systems: GlobalSystems<Stage>,
        context: GlobalContext,
        audio: RecordingAudio,
        share: RecordingShare,
    }

    impl Harness {
        fn new() -> Self {
            let config = GameConfig::default();
            let audio = RecordingAudio::default();
            let share = RecordingShare::default();
            let systems = GlobalSystems::new(
                Game::new(Stage::new(400.0, 600.0), config.clone()),
                AudioSystem::new(
                    Box::new(audio.clone()),
                    AssetCatalog::from_config(&config.assets),
                ),
                ShareSystem::new(Box::new(share.clone())),
            );
            Self {
                systems,
                context: GlobalContext::new(),
                audio,
                share,
            }
        }

        /// One tick with a press/release pair at each point.
        fn tick_with_taps(&mut self, points: &[Point]) {
            let batch = points
                .iter()
                .flat_map(|p| {
                    [
                        InputEvent::PointerDown { button: PointerButton::Primary, x: p.x, y: p.y },
                        InputEvent::PointerUp { button: PointerButton::Primary, x: p.x, y: p.y },
                    ]
                })
                .collect();
            self.tick_with_events(batch);
        }

        fn tick_with_events(&mut self, batch: Vec<InputEvent>) {
            self.context.frame_input_events.push(batch);
            self.systems.update(&mut self.context);
        }
    }

    fn region(i: usize) -> Point {
        GameConfig::default().region_centers()[i]
    }

    #[test]
    fn all_regions_in_one_tick_complete_and_play_both_cues() {
        let mut h = Harness::new();

        h.tick_with_taps(&[region(0), region(1), region(2)]);

        assert!(h.systems.game.is_complete());
        assert_eq!(
            *h.audio.0.lock().unwrap(),
            vec![AssetId::HitSound, AssetId::HitSound, AssetId::HitSound, AssetId::ClearSound]
        );
        assert_eq!(h.context.message_bus.total_pending(), 0, "Bus is cleared every tick");
    }

    #[test]
    fn double_tap_in_one_tick_scores_once() {
        let mut h = Harness::new();

        h.tick_with_taps(&[region(1), region(1)]);

        assert_eq!(h.systems.game.session().score(), 1);
        assert_eq!(h.audio.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn share_reaches_the_target() {
        let mut h = Harness::new();
        h.tick_with_taps(&[region(0), region(1), region(2)]);

        h.tick_with_taps(&[Point::new(260.0, 520.0)]);

        let shared = h.share.0.lock().unwrap();
        assert_eq!(shared.len(), 1);
        assert!(shared[0].text.ends_with("seconds to spot all the differences!"));
    }

    #[test]
    fn retry_tap_restarts_and_next_tap_hits_new_scene() {
        let mut h = Harness::new();
        h.tick_with_taps(&[region(0), region(1), region(2)]);

        h.tick_with_taps(&[Point::new(60.0, 520.0), region(2)]);

        assert!(h.systems.game.is_playing());
        assert_eq!(h.systems.game.session().score(), 1, "Tap after retry lands on fresh regions");
    }

    #[test]
    fn second_finger_scores_while_first_is_held() {
        let mut h = Harness::new();
        let finger = |id, x, y| InputEvent::PointerDown { button: PointerButton::Touch(id), x, y };
        let b = region(0);

        h.tick_with_events(vec![
            finger(0, 60.0, 100.0),
            finger(1, b.x, b.y),
            InputEvent::PointerUp { button: PointerButton::Touch(1), x: b.x, y: b.y },
        ]);

        assert_eq!(h.systems.game.session().score(), 1);
        assert_eq!(*h.audio.0.lock().unwrap(), vec![AssetId::HitSound]);
    }

    #[test]
    fn input_is_consumed_each_tick() {
        let mut h = Harness::new();
        h.tick_with_taps(&[region(0)]);
        assert!(h.context.frame_input_events.is_empty());

        h.systems.update(&mut h.context);
        assert_eq!(h.systems.game.session().score(), 1);
        assert_eq!(h.systems.game.session().ticks(), 2);
    }
}

//=========================================================================
// Core Systems Orchestrator
//
// Runs the game on the logic (non-platform) thread.
//
// Responsibilities:
// - Own every core system (input, game, audio, share)
// - Receive platform events over the crossbeam channel
// - Tick at a fixed rate (TPS); the game timer assumes exactly one
//   1/TPS step per tick
//
// Notes:
// The orchestrator never touches the window. Communication with the
// platform occurs only through `PlatformEvent` messages.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Modules =============================================================

pub mod assets;
pub mod audio;
pub mod game;
pub mod globals;
pub mod input;
pub mod message_bus;
pub(crate) mod platform_bridge;
pub mod scene;
pub mod share;

//=== Internal Modules ====================================================
use globals::{GlobalContext, GlobalSystems};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::RenderSurface;

//=== CoreSystemsOrchestrator =============================================
//
// Owns the systems and the shared context, and drives them one tick at a
// time. `step` is the whole tick minus pacing, which keeps it testable
// without a thread.
//
pub(crate) struct CoreSystemsOrchestrator<R: RenderSurface> {
    systems: GlobalSystems<R>,
    context: GlobalContext,
}

impl<R: RenderSurface + 'static> CoreSystemsOrchestrator<R> {
    //--- Construction -----------------------------------------------------

    pub fn new(systems: GlobalSystems<R>) -> Self {
        Self {
            systems,
            context: GlobalContext::new(),
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. Each tick:
    //  1. Collects platform events (exits on close or disconnect)
    //  2. Updates all systems
    //  3. Sleeps the rest of the 1/TPS budget
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut orchestrator = self;
            let mut collector = EventCollector::new(receiver);
            let mut ticks: u64 = 0;

            loop {
                let frame_start = Instant::now();

                if orchestrator.step(&mut collector) == TickControl::Exit {
                    info!("Core thread exiting after {} ticks", ticks);
                    break;
                }
                ticks += 1;

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    debug!("Tick {} overran budget by {:?}", ticks, elapsed - frame_duration);
                }
            }
        })
    }

    //--- step() -----------------------------------------------------------
    //
    // Runs one tick without pacing.
    //
    pub(crate) fn step(&mut self, collector: &mut EventCollector) -> TickControl {
        if collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        self.context.frame_input_events = collector.take_batches();
        self.systems.update(&mut self.context);
        TickControl::Continue
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn systems(&self) -> &GlobalSystems<R> {
        &self.systems
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

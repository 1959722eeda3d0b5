//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side end of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input_batches → TickControl
//
// Draining is bounded per tick so a flood of input cannot starve the game
// loop; whatever is left over is picked up on the next tick. Pacing is the
// orchestrator's job, so an empty channel returns immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events into per-tick input batches.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Collects pending platform events, at most 100 per call.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        info!(target: "platform", "Window closed, stopping core");
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Input batches collected by the last `collect_frame`.
    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes ownership of collected input batches, leaving an empty vec.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Session
//=========================================================================
//
// Score and timer for one playthrough, as a plain value.
//
// Transitions take `self` and return the next value; the state machine
// owns the current one. Invariants:
//   0 <= score <= total, score never decreases
//   ticks only grow; elapsed = ticks * seconds_per_tick
//
// The timer counts ticks, not wall-clock time: a dropped frame is simply
// a tick that never happened.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::timer::format_elapsed;

//=== Session =============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    score: usize,
    total: usize,
    ticks: u64,
    seconds_per_tick: f64,
}

impl Session {
    /// Fresh session: nothing found, timer at zero.
    pub fn new(total: usize, seconds_per_tick: f64) -> Self {
        Self {
            score: 0,
            total,
            ticks: 0,
            seconds_per_tick,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// One more difference found. Saturates at `total`.
    #[must_use]
    pub fn record_find(self) -> Self {
        debug_assert!(self.score < self.total, "score would exceed total");
        Self {
            score: (self.score + 1).min(self.total),
            ..self
        }
    }

    /// Advances the timer by one tick.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            ticks: self.ticks + 1,
            ..self
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.ticks as f64 * self.seconds_per_tick
    }

    pub fn is_complete(&self) -> bool {
        self.score == self.total
    }

    /// `found/total`, e.g. `2/3`.
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }

    /// Elapsed time to two decimals, e.g. `2.00`.
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_secs())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

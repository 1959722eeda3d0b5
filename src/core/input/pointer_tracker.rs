//=========================================================================
// Pointer Tracker
//=========================================================================
//
// Pointer state with per-frame press detection.
//
// Architecture:
//   InputEvent → process_events() → buttons held + taps this frame → query
//
// Frame lifecycle: clear() → process_events() → take_taps()
//
// A tap is a left-button or touch press that transitions UP → DOWN; the
// tap position is the press position. Touch contacts are keyed by id, so a
// second finger taps while the first is still held. Multiple taps in one frame are kept in delivery
// order so the game sees them one at a time.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, PointerButton};
use crate::core::scene::Point;

//=== PointerTracker ======================================================

/// Tracks held buttons and last position, and collects taps per frame.
pub struct PointerTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    buttons_down: HashSet<PointerButton>,
    position: Point,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    taps_this_frame: Vec<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            buttons_down: HashSet::new(),
            position: Point::new(0.0, 0.0),
            taps_this_frame: Vec::with_capacity(4),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub fn clear(&mut self) {
        self.taps_this_frame.clear();
    }

    /// Processes one frame's worth of events in delivery order.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Removes and returns this frame's taps, oldest first.
    pub fn take_taps(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.taps_this_frame)
    }

    //--- Query API --------------------------------------------------------

    /// Taps recorded since the last `clear()`.
    pub fn taps(&self) -> &[Point] {
        &self.taps_this_frame
    }

    /// Last known pointer position in stage coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns `true` while the button is held.
    pub fn is_down(&self, button: PointerButton) -> bool {
        self.buttons_down.contains(&button)
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { button, x, y } => {
                self.position = Point::new(x, y);
                // Only a fresh press counts; repeats while held are ignored
                if self.buttons_down.insert(button) && button.is_tap_source() {
                    trace!(target: "input", "Tap at ({}, {})", x, y);
                    self.taps_this_frame.push(self.position);
                }
            }

            InputEvent::PointerUp { button, x, y } => {
                self.position = Point::new(x, y);
                self.buttons_down.remove(&button);
            }

            InputEvent::PointerMoved { x, y } => {
                self.position = Point::new(x, y);
            }

            InputEvent::Unidentified => {}
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { button: PointerButton::Primary, x, y }
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { button: PointerButton::Primary, x, y }
    }

    #[test]
    fn press_records_a_tap_at_press_position() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[down(104.0, 394.0)]);

        assert_eq!(tracker.taps(), &[Point::new(104.0, 394.0)]);
        assert!(tracker.is_down(PointerButton::Primary));
    }

    #[test]
    fn held_button_does_not_repeat_taps() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[down(1.0, 1.0), down(2.0, 2.0)]);

        assert_eq!(tracker.taps().len(), 1, "A press while held is not a new tap");
    }

    #[test]
    fn press_release_press_yields_two_taps_in_order() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[down(1.0, 1.0), up(1.0, 1.0), down(5.0, 6.0)]);

        assert_eq!(tracker.take_taps(), vec![Point::new(1.0, 1.0), Point::new(5.0, 6.0)]);
        assert!(tracker.taps().is_empty(), "take_taps drains the frame");
    }

    #[test]
    fn secondary_button_is_not_a_tap() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[InputEvent::PointerDown {
            button: PointerButton::Secondary,
            x: 3.0,
            y: 3.0,
        }]);

        assert!(tracker.taps().is_empty());
        assert!(tracker.is_down(PointerButton::Secondary));
    }

    fn touch(id: u64, pressed: bool, x: f32, y: f32) -> InputEvent {
        let button = PointerButton::Touch(id);
        if pressed {
            InputEvent::PointerDown { button, x, y }
        } else {
            InputEvent::PointerUp { button, x, y }
        }
    }

    #[test]
    fn second_finger_taps_while_first_is_held() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[
            touch(1, true, 60.0, 100.0),
            touch(2, true, 104.0, 394.0),
            touch(2, false, 104.0, 394.0),
        ]);

        assert_eq!(
            tracker.taps(),
            &[Point::new(60.0, 100.0), Point::new(104.0, 394.0)]
        );
        assert!(tracker.is_down(PointerButton::Touch(1)), "First finger is still held");
        assert!(!tracker.is_down(PointerButton::Touch(2)));
    }

    #[test]
    fn lifting_one_finger_keeps_the_other_held() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[touch(1, true, 1.0, 1.0), touch(2, true, 2.0, 2.0)]);
        tracker.process_events(&[touch(1, false, 1.0, 1.0), touch(2, true, 3.0, 3.0)]);

        assert_eq!(tracker.taps().len(), 2, "Held finger does not tap again");
        assert!(tracker.is_down(PointerButton::Touch(2)));
    }

    #[test]
    fn clear_keeps_persistent_state() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[down(7.0, 8.0)]);
        tracker.clear();

        assert!(tracker.taps().is_empty());
        assert!(tracker.is_down(PointerButton::Primary), "Held buttons survive the frame");
        assert_eq!(tracker.position(), Point::new(7.0, 8.0));
    }

    #[test]
    fn moves_update_position_only() {
        let mut tracker = PointerTracker::new();
        tracker.process_events(&[InputEvent::PointerMoved { x: 50.0, y: 60.0 }]);

        assert_eq!(tracker.position(), Point::new(50.0, 60.0));
        assert!(tracker.taps().is_empty());
    }
}

//=========================================================================
// Input Event Types
//=========================================================================
//
// Platform-independent pointer events, already expressed in stage
// coordinates (logical pixels, top-left origin).
//
// Event Flow:
// ```text
// Platform Layer (Winit mouse / touch)
//         ↓
//    InputEvent (this module)
//         ↓
//    PointerTracker (press edges → taps)
//         ↓
//    Stage hit-test → GameEvent
// ```
//
// Equality & hashing follow the buffer's needs: `PointerMoved` events are
// all equal so the platform can coalesce them (last position wins);
// press/release events compare by button and position.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== PointerButton =======================================================

/// Which pointer produced a press or release.
///
/// Each touch contact is tracked separately by its platform id, so
/// several fingers can be down at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Wheel click.
    Middle,
    /// Side, thumb and macro buttons.
    Other,
    /// One touch contact, keyed by its platform id.
    Touch(u64),
}

impl PointerButton {
    /// Presses that count as a tap: the left button or any touch contact.
    pub fn is_tap_source(self) -> bool {
        matches!(self, Self::Primary | Self::Touch(_))
    }
}

//=== InputEvent ==========================================================

/// Low-level pointer event from the platform layer.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Pointer pressed at a stage position.
    PointerDown { button: PointerButton, x: f32, y: f32 },

    /// Pointer released at a stage position.
    PointerUp { button: PointerButton, x: f32, y: f32 },

    /// Pointer moved to a new stage position.
    PointerMoved { x: f32, y: f32 },

    /// Anything the platform saw but the game has no use for.
    Unidentified,
}

impl InputEvent {
    /// Stage position carried by the event, if any.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::PointerMoved { x, y } => Some((x, y)),
            Self::Unidentified => None,
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (
                PointerDown { button: a, x: ax, y: ay },
                PointerDown { button: b, x: bx, y: by },
            )
            | (
                PointerUp { button: a, x: ax, y: ay },
                PointerUp { button: b, x: bx, y: by },
            ) => a == b && ax == bx && ay == by,
            // Coordinates ignored so moves coalesce
            (PointerMoved { .. }, PointerMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + button only; positions are left out, which stays
/// consistent with equality (equal events always share a hash).
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::PointerDown { button, .. } | Self::PointerUp { button, .. } => {
                button.hash(state);
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { button: PointerButton::Primary, x, y }
    }

    #[test]
    fn moves_are_equal_regardless_of_position() {
        let a = InputEvent::PointerMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::PointerMoved { x: 300.0, y: 400.0 };
        assert_eq!(a, b, "PointerMoved should coalesce");
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn presses_compare_position() {
        assert_eq!(down(10.0, 10.0), down(10.0, 10.0));
        assert_ne!(down(10.0, 10.0), down(10.0, 11.0), "Distinct taps must not dedupe");
    }

    #[test]
    fn press_and_release_differ() {
        let up = InputEvent::PointerUp { button: PointerButton::Primary, x: 5.0, y: 5.0 };
        assert_ne!(down(5.0, 5.0), up);
        assert_ne!(hash_of(&down(5.0, 5.0)), hash_of(&up));
    }

    #[test]
    fn equal_events_share_a_hash() {
        assert_eq!(hash_of(&down(1.0, 2.0)), hash_of(&down(1.0, 2.0)));
    }

    #[test]
    fn hashset_keeps_latest_move() {
        let mut set = HashSet::new();
        set.insert(InputEvent::PointerMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::PointerMoved { x: 9.0, y: 9.0 });

        assert_eq!(set.len(), 1);
        let kept = set.iter().next().and_then(InputEvent::position);
        assert_eq!(kept, Some((9.0, 9.0)));
    }

    #[test]
    fn touches_with_different_ids_are_distinct() {
        let a = InputEvent::PointerDown { button: PointerButton::Touch(1), x: 5.0, y: 5.0 };
        let b = InputEvent::PointerDown { button: PointerButton::Touch(2), x: 5.0, y: 5.0 };
        assert_ne!(a, b, "Simultaneous fingers at one spot must not dedupe");
    }

    #[test]
    fn tap_sources() {
        assert!(PointerButton::Primary.is_tap_source());
        assert!(PointerButton::Touch(7).is_tap_source());
        assert!(!PointerButton::Secondary.is_tap_source());
        assert!(!PointerButton::Middle.is_tap_source());
    }

    #[test]
    fn unidentified_has_no_position() {
        assert_eq!(InputEvent::Unidentified.position(), None);
    }
}

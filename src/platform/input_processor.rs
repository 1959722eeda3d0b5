//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit mouse and touch events into stage-space InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (stage coords) → InputBuffer
//
// winit reports physical pixels; the stage is laid out in logical pixels,
// so every position is divided by the current scale factor. Mouse button
// events carry no position, so the last cursor position is cached.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton as WinitMouseButton, TouchPhase},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, PointerButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    scale_factor: f64,
    cursor: (f32, f32),
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            scale_factor: 1.0,
            cursor: (0.0, 0.0),
        }
    }

    //--- Scale Factor -----------------------------------------------------

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub(crate) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    //--- Event Processing -------------------------------------------------

    /// Records the cursor and emits a move in stage coordinates.
    pub(crate) fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> InputEvent {
        self.cursor = self.to_stage(position);
        let (x, y) = self.cursor;
        InputEvent::PointerMoved { x, y }
    }

    /// Press/release at the last known cursor position.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = PointerButton::from(button);
        let (x, y) = self.cursor;

        match state {
            ElementState::Pressed => InputEvent::PointerDown { button, x, y },
            ElementState::Released => InputEvent::PointerUp { button, x, y },
        }
    }

    /// Each touch contact becomes its own pointer, keyed by the winit id.
    pub(crate) fn process_touch(
        &self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> InputEvent {
        let (x, y) = self.to_stage(location);
        let button = PointerButton::Touch(id);

        match phase {
            TouchPhase::Started => InputEvent::PointerDown { button, x, y },
            TouchPhase::Moved => InputEvent::PointerMoved { x, y },
            TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::PointerUp { button, x, y },
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn to_stage(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        (logical.x as f32, logical.y as f32)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Left is the primary button; Back/Forward/Other collapse to `Other`.
impl From<WinitMouseButton> for PointerButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => PointerButton::Primary,
            WinitMouseButton::Right => PointerButton::Secondary,
            WinitMouseButton::Middle => PointerButton::Middle,
            _ => PointerButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

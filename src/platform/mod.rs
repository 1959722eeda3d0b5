//=========================================================================
// Platform Subsystem
//
// Bridges winit (window, mouse, touch) with the core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  PointerTracker  │
//  │   ├─ physical → stage    │    │  ↓               │
//  │   └─ caches cursor       │    │  Stage hit-test  │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  Game            │
//  │   ├─ discrete: Vec<>     │    │                  │
//  │   └─ continuous: Set<>   │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// - RedrawRequested is the frame boundary; empty buffers are not sent
// - A disconnected channel is logged, the window stays closable
// - Runs on the thread that called `Engine::run()` (winit main-thread
//   requirement on macOS/iOS)
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::WindowConfig;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and pointer input aggregator.
///
/// Not `Send`: it stays on the main thread and only talks to the core
/// through `event_sender`.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Title and logical size used when the window is created.
    window_config: WindowConfig,

    /// Buffers input until the next frame boundary.
    buffer: InputBuffer,

    /// Channel to the core thread.
    event_sender: Sender<PlatformEvent>,

    /// Converts winit events to stage-space InputEvents.
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, window_config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_config,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// terminates with an error.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends everything buffered since the last redraw as one
    /// [`PlatformEvent::Inputs`]. Events are dropped with a warning if the
    /// core thread is gone.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(self.window_config.width, self.window_config.height))
            .with_resizable(false)
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.notify_closed();
        event_loop.exit();
    }

    /// Tells the core the window is gone. Returns `false` if the core has
    /// already hung up.
    fn notify_closed(&self) -> bool {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            warn!(target: "platform", "Channel disconnected, core did not receive close");
            return false;
        }
        true
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume. Later resumes (mobile) reuse it.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        match event_loop.create_window(self.window_attributes()) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.input_processor.set_scale_factor(window.scale_factor());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed to {}", scale_factor);
                self.input_processor.set_scale_factor(scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_cursor_moved(position);
                self.buffer.push_continuous(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(touch.id, touch.phase, touch.location);
                if touch.phase == TouchPhase::Moved {
                    self.buffer.push_continuous(event);
                } else {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
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
    use crate::core::input::{InputEvent, PointerButton};
    use crossbeam_channel::unbounded;

    fn press() -> InputEvent {
        InputEvent::PointerDown { button: PointerButton::Primary, x: 104.0, y: 394.0 }
    }

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (Platform::new(tx, WindowConfig::default()), rx)
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx) = platform();

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(press());

        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, vec![press()]);
                assert!(continuous.is_empty(), "Should have no continuous events");
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(press());
        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty(), "Events are dropped, not retained");
    }

    #[test]
    fn multiple_flushes_send_once() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(press());

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn close_notifies_core() {
        let (platform, rx) = platform();

        assert!(platform.notify_closed());
        assert_eq!(rx.try_recv(), Ok(PlatformEvent::WindowClosed));
    }

    #[test]
    fn close_reports_disconnected_core() {
        let (platform, rx) = platform();
        drop(rx);

        assert!(!platform.notify_closed(), "Send failure is reported, not ignored");
    }

    #[test]
    fn window_attributes_follow_config() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(
            tx,
            WindowConfig {
                title: "Test".into(),
                width: 320,
                height: 480,
            },
        );

        let attrs = platform.window_attributes();
        assert_eq!(attrs.title, "Test");
        assert!(!attrs.resizable);
    }
}

//! Native listening service contract
//!
//! The core depends only on this abstract grab/ungrab/run-loop contract.
//! A platform adapter (X11 key grabs, a compositor portal, ...) implements
//! it for real systems; tests substitute a scripted double.

use std::sync::Arc;

/// Result of a native grab request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    /// The combination is now delivered exclusively to this process.
    Granted,
    /// Another owner already holds the combination.
    Conflict,
}

/// Error returned when the backend event loop cannot run or dies.
#[derive(Debug, thiserror::Error)]
#[error("native event loop failed: {0}")]
pub struct BackendError(pub String);

/// Callbacks the backend raises from inside its event loop.
///
/// All methods are invoked on the listening thread.
pub trait EventSink: Send + Sync {
    /// The event loop is set up; grabs are honored from now on.
    fn on_ready(&self);

    /// A registered combination was pressed.
    fn on_hotkey(&self, id: i32);

    /// Backend diagnostics, routed through the debug sink router.
    fn on_debug(&self, message: &str);
}

/// The native key-grab service consumed by [`HotkeyService`].
///
/// `grab` and `ungrab` must return promptly; `run_event_loop` blocks the
/// calling thread until [`request_stop`] is called or the loop fails.
///
/// [`HotkeyService`]: crate::HotkeyService
/// [`request_stop`]: NativeBackend::request_stop
pub trait NativeBackend: Send + Sync {
    /// Reserve (mask, keysym) system-wide for this process, under `id`.
    fn grab(&self, id: i32, mask: u32, keysym: u32) -> GrabOutcome;

    /// Release the grab registered under `id`.
    fn ungrab(&self, id: i32);

    /// Pump native events, raising sink callbacks, until stopped.
    fn run_event_loop(&self, sink: Arc<dyn EventSink>) -> Result<(), BackendError>;

    /// Ask a blocked `run_event_loop` to return.
    fn request_stop(&self);
}

//! keygrab: global hotkey registration and dispatch
//!
//! Registers key combinations at the window-system level so they fire even
//! when the application is not focused. The crate owns:
//! - the registry of (id → modifier mask, keysym) bindings with conflict
//!   detection
//! - the lifecycle of the background listening thread
//! - registration-ordered dispatch of firings to observers
//! - translation tables between a toolkit's key representation and the
//!   window system's native one
//!
//! The native grab/ungrab primitives and the blocking event pump are behind
//! the [`NativeBackend`] trait, implemented by a platform adapter (or a test
//! double).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keygrab::{keys, HotkeyObserver, ServiceCell};
//!
//! struct OpenInbox;
//!
//! impl HotkeyObserver for OpenInbox {
//!     fn on_hotkey(&self, id: i32) {
//!         println!("hotkey {id} fired");
//!     }
//! }
//!
//! static HOTKEYS: ServiceCell = ServiceCell::new();
//!
//! # fn platform_backend() -> Arc<dyn keygrab::NativeBackend> { unimplemented!() }
//! fn main() -> Result<(), keygrab::Error> {
//!     let service = HOTKEYS.acquire(platform_backend)?;
//!     service.add_observer(Arc::new(OpenInbox));
//!     service.register_toolkit_hotkey(
//!         1,
//!         keys::toolkit_mask::CONTROL | keys::toolkit_mask::ALT,
//!         keys::toolkit_key::F,
//!     )?;
//!     // ... run the application ...
//!     HOTKEYS.shutdown();
//!     Ok(())
//! }
//! ```

mod backend;
mod debug;
mod dispatch;
mod error;
pub mod keys;
mod registry;
mod service;

pub use backend::{BackendError, EventSink, GrabOutcome, NativeBackend};
pub use debug::set_debug_output;
pub use dispatch::HotkeyObserver;
pub use error::Error;
pub use registry::HotkeyBinding;
pub use service::{HotkeyService, LifecycleState, ServiceCell};

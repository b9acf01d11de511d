//! Error taxonomy for registry and lifecycle operations
//!
//! Usage errors (duplicate id, unmapped key), grab conflicts and lifecycle
//! faults are separate variants so callers can match on them instead of
//! inspecting messages.

use crate::service::LifecycleState;

/// Errors surfaced by registry and lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The id is already bound. Registration never silently replaces.
    #[error("hotkey id {id} is already registered")]
    AlreadyRegistered { id: i32 },

    /// The native service refused the grab: another owner already holds
    /// this (mask, keysym) combination. The registry is left unchanged.
    #[error("hotkey id {id} (mask 0x{mask:x}, keysym 0x{keysym:x}) is already grabbed by another owner")]
    Conflict { id: i32, mask: u32, keysym: u32 },

    /// The toolkit keycode has no native keysym equivalent.
    #[error("toolkit keycode 0x{keycode:x} has no native keysym")]
    UnmappedKey { keycode: u32 },

    /// The NO_SYMBOL sentinel reached a register call.
    #[error("cannot register the NO_SYMBOL sentinel as a hotkey")]
    NoSymbol,

    /// The operation requires a running service.
    #[error("hotkey service is not running (state: {state})")]
    NotRunning { state: LifecycleState },

    /// The listening thread died while the service was running. The service
    /// is dead; shut it down and acquire a fresh one.
    #[error("listening thread exited unexpectedly")]
    ListenerExited,

    /// The listening thread exited before the backend became ready.
    #[error("listening thread failed during startup: {reason}")]
    StartupFailed { reason: String },

    /// The listening thread could not be spawned.
    #[error("failed to spawn listening thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),
}

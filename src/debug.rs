//! Debug sink router
//!
//! Routes internal diagnostic strings either to debug-capable observers or,
//! when none is registered, to the tracing layer. Off by default; the toggle
//! is process-wide. Routing only locks the observer set, never the registry,
//! so the listening thread can emit while a register call is in progress.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::dispatch::ObserverSet;

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug output for the whole process.
pub fn set_debug_output(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
}

pub(crate) fn enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Trim surrounding whitespace and guarantee exactly one trailing newline.
pub(crate) fn normalize(message: &str) -> String {
    let mut normalized = message.trim().to_string();
    normalized.push('\n');
    normalized
}

/// Route a debug message to debug-capable observers, or the default sink
/// when none is registered.
///
/// The message is built lazily: when debug output is disabled this returns
/// before any string work.
pub(crate) fn emit_with<F>(observers: &ObserverSet, message: F)
where
    F: FnOnce() -> String,
{
    if !enabled() {
        return;
    }
    let normalized = normalize(&message());
    if !observers.debug_broadcast(&normalized) {
        debug!(target: "keygrab", "{}", normalized.trim_end());
    }
}

//! Hotkey registry: the authoritative id -> (mask, keysym) table
//!
//! Validates registrations before delegating to the native backend.
//! Insertion order is preserved for deterministic diagnostics. The owning
//! service serializes all mutations behind a mutex (single-writer
//! discipline); this type itself is not synchronized.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{GrabOutcome, NativeBackend};
use crate::error::Error;
use crate::keys::NO_SYMBOL;

/// A registered hotkey binding. Identity is `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    pub id: i32,
    pub mask: u32,
    pub keysym: u32,
}

/// Ordered table of bindings, keyed by unique id.
#[derive(Debug, Default)]
pub(crate) struct HotkeyRegistry {
    bindings: Vec<HotkeyBinding>,
}

impl HotkeyRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a binding, delegating the grab to the backend.
    ///
    /// Fails with `AlreadyRegistered` if the id is present (never silently
    /// replaces), with `NoSymbol` for the unmapped-key sentinel, and with
    /// `Conflict` when the backend reports the combination is owned
    /// elsewhere. On conflict nothing is inserted.
    pub(crate) fn register(
        &mut self,
        backend: &dyn NativeBackend,
        binding: HotkeyBinding,
    ) -> Result<(), Error> {
        if binding.keysym == NO_SYMBOL {
            return Err(Error::NoSymbol);
        }
        if self.contains(binding.id) {
            return Err(Error::AlreadyRegistered { id: binding.id });
        }

        match backend.grab(binding.id, binding.mask, binding.keysym) {
            GrabOutcome::Granted => {
                debug!(
                    id = binding.id,
                    mask = format_args!("0x{:x}", binding.mask),
                    keysym = format_args!("0x{:x}", binding.keysym),
                    "hotkey registered"
                );
                self.bindings.push(binding);
                Ok(())
            }
            GrabOutcome::Conflict => Err(Error::Conflict {
                id: binding.id,
                mask: binding.mask,
                keysym: binding.keysym,
            }),
        }
    }

    /// Unregister by id. Absent ids are a no-op; the ungrab is only issued
    /// for bindings that exist.
    pub(crate) fn unregister(&mut self, backend: &dyn NativeBackend, id: i32) {
        if let Some(pos) = self.bindings.iter().position(|b| b.id == id) {
            backend.ungrab(id);
            self.bindings.remove(pos);
            debug!(id, "hotkey unregistered");
        }
    }

    /// Ungrab and drop every binding. Safe on an empty registry.
    pub(crate) fn unregister_all(&mut self, backend: &dyn NativeBackend) {
        for binding in self.bindings.drain(..) {
            backend.ungrab(binding.id);
            debug!(id = binding.id, "hotkey unregistered");
        }
    }

    pub(crate) fn contains(&self, id: i32) -> bool {
        self.bindings.iter().any(|b| b.id == id)
    }

    /// Snapshot of the bindings in registration order.
    pub(crate) fn snapshot(&self) -> Vec<HotkeyBinding> {
        self.bindings.clone()
    }
}

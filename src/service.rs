//! Hotkey service lifecycle
//!
//! `HotkeyService` owns the registry, the observer set and the background
//! listening thread. `ServiceCell` guards one-time construction and teardown
//! so exactly one listening thread exists per lifetime, and a later acquire
//! after shutdown rebuilds a fresh instance.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::backend::{EventSink, NativeBackend};
use crate::dispatch::{HotkeyObserver, ObserverSet};
use crate::error::Error;
use crate::keys;
use crate::registry::{HotkeyBinding, HotkeyRegistry};

/// How long startup waits for the backend's ready signal before assuming
/// the event loop is up.
const STARTUP_GRACE: Duration = Duration::from_secs(2);

/// How long shutdown waits for the listening thread's completion signal.
/// If the native loop never terminates this is the liveness bound: shutdown
/// gives up and logs instead of blocking forever.
const SHUTDOWN_WAIT: Duration = Duration::from_secs(5);

/// Lifecycle of the hotkey service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// No service exists; the next acquire builds one.
    Uninitialized,
    /// Listening thread spawned, waiting for the backend to become ready.
    Starting,
    /// Grabs are honored and firings are dispatched.
    Running,
    /// Teardown in progress.
    ShuttingDown,
    /// The listening thread has exited.
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Uninitialized => write!(f, "Uninitialized"),
            LifecycleState::Starting => write!(f, "Starting"),
            LifecycleState::Running => write!(f, "Running"),
            LifecycleState::ShuttingDown => write!(f, "ShuttingDown"),
            LifecycleState::Stopped => write!(f, "Stopped"),
        }
    }
}

struct ListenerHandle {
    thread: JoinHandle<()>,
    done_rx: mpsc::Receiver<()>,
}

/// The running hotkey service.
///
/// Registry mutations are serialized behind a mutex; observer registration
/// and dispatch use the copy-on-write observer set and may run concurrently
/// with registry calls.
pub struct HotkeyService {
    backend: Arc<dyn NativeBackend>,
    registry: Mutex<HotkeyRegistry>,
    observers: Arc<ObserverSet>,
    state: Mutex<LifecycleState>,
    listener: Mutex<Option<ListenerHandle>>,
    died: AtomicBool,
}

impl fmt::Debug for HotkeyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotkeyService").finish_non_exhaustive()
    }
}

/// Event-loop callbacks wired to the dispatcher and the debug router.
struct ListenerSink {
    observers: Arc<ObserverSet>,
    ready_tx: Mutex<Option<mpsc::Sender<()>>>,
}

impl EventSink for ListenerSink {
    fn on_ready(&self) {
        let tx = self
            .ready_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
    }

    fn on_hotkey(&self, id: i32) {
        crate::debug::emit_with(&self.observers, || format!("hotkey fired: id={id}"));
        self.observers.dispatch(id);
    }

    fn on_debug(&self, message: &str) {
        crate::debug::emit_with(&self.observers, || message.to_string());
    }
}

impl HotkeyService {
    /// Spawn the listening thread and wait (bounded) for the backend to
    /// become ready.
    ///
    /// Returns the shared handle once the service is Running. If the event
    /// loop exits during startup this fails with `StartupFailed`.
    pub fn start(backend: Arc<dyn NativeBackend>) -> Result<Arc<Self>, Error> {
        let service = Arc::new(Self {
            backend: Arc::clone(&backend),
            registry: Mutex::new(HotkeyRegistry::new()),
            observers: Arc::new(ObserverSet::new()),
            state: Mutex::new(LifecycleState::Starting),
            listener: Mutex::new(None),
            died: AtomicBool::new(false),
        });

        let (ready_tx, ready_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();

        let sink: Arc<dyn EventSink> = Arc::new(ListenerSink {
            observers: Arc::clone(&service.observers),
            ready_tx: Mutex::new(Some(ready_tx)),
        });

        // The thread holds a weak handle so a dropped service does not keep
        // its own listener alive through the closure.
        let weak = Arc::downgrade(&service);
        let thread = thread::Builder::new()
            .name("keygrab-listener".to_string())
            .spawn(move || {
                info!("listening thread started");
                if let Err(e) = backend.run_event_loop(sink) {
                    error!(%e, "native event loop failed");
                }
                if let Some(service) = weak.upgrade() {
                    service.note_listener_exit();
                }
                let _ = done_tx.send(());
                info!("listening thread stopped");
            })
            .map_err(Error::ThreadSpawn)?;

        // Ready signal or grace period, whichever comes first.
        match ready_rx.recv_timeout(STARTUP_GRACE) {
            Ok(()) => debug!("backend signaled ready"),
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    grace = ?STARTUP_GRACE,
                    "no ready signal from backend, assuming the event loop is up"
                );
            }
            Err(RecvTimeoutError::Disconnected) => {
                // The loop dropped the sink without ever signaling.
                let _ = thread.join();
                return Err(Error::StartupFailed {
                    reason: "event loop exited before signaling ready".to_string(),
                });
            }
        }

        {
            let mut state = service
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *state != LifecycleState::Starting {
                // The thread already exited and marked the service dead.
                let _ = thread.join();
                return Err(Error::StartupFailed {
                    reason: "event loop exited during startup".to_string(),
                });
            }
            *state = LifecycleState::Running;
        }

        *service
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(ListenerHandle { thread, done_rx });

        info!("hotkey service running");
        Ok(service)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_running(&self) -> bool {
        self.state() == LifecycleState::Running
    }

    pub(crate) fn has_died(&self) -> bool {
        self.died.load(Ordering::SeqCst)
    }

    /// Register a hotkey with native mask and keysym values.
    pub fn register_hotkey(&self, id: i32, mask: u32, keysym: u32) -> Result<(), Error> {
        self.ensure_running()?;
        let binding = HotkeyBinding { id, mask, keysym };
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .register(self.backend.as_ref(), binding)?;
        crate::debug::emit_with(&self.observers, || {
            format!("registered hotkey id={id} mask=0x{mask:x} keysym=0x{keysym:x}")
        });
        Ok(())
    }

    /// Translate a toolkit mask and keycode, then register the hotkey.
    ///
    /// Fails with `UnmappedKey` when the keycode has no native keysym.
    pub fn register_toolkit_hotkey(
        &self,
        id: i32,
        toolkit_mask: u32,
        toolkit_keycode: u32,
    ) -> Result<(), Error> {
        let mask = keys::to_native_mask(toolkit_mask);
        let keysym = keys::to_native_keysym(toolkit_keycode);
        if keysym == keys::NO_SYMBOL {
            return Err(Error::UnmappedKey {
                keycode: toolkit_keycode,
            });
        }
        crate::debug::emit_with(&self.observers, || {
            format!(
                "converted toolkit hotkey (mask=0x{toolkit_mask:x}, keycode=0x{toolkit_keycode:x}) \
                 to native (mask=0x{mask:x}, keysym=0x{keysym:x})"
            )
        });
        self.register_hotkey(id, mask, keysym)
    }

    /// Unregister a hotkey. Unregistering an absent id is a no-op.
    ///
    /// A firing already in flight may still be delivered after this returns;
    /// unregistration cancels future firings, not in-flight dispatch.
    pub fn unregister_hotkey(&self, id: i32) -> Result<(), Error> {
        self.ensure_running()?;
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .unregister(self.backend.as_ref(), id);
        Ok(())
    }

    /// Snapshot of the registered bindings, in registration order.
    pub fn registered_hotkeys(&self) -> Vec<HotkeyBinding> {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    pub fn add_observer(&self, observer: Arc<dyn HotkeyObserver>) {
        self.observers.add(observer);
    }

    /// Remove an observer by pointer identity. Returns whether it was found.
    pub fn remove_observer(&self, observer: &Arc<dyn HotkeyObserver>) -> bool {
        self.observers.remove(observer)
    }

    /// Tear the service down: unregister everything, stop the event loop,
    /// await the listening thread (bounded) and clear the observers.
    ///
    /// Prefer [`ServiceCell::shutdown`], which also resets the cell so the
    /// next acquire rebuilds. Calling this twice is a no-op.
    pub fn shutdown(&self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if matches!(
                *state,
                LifecycleState::ShuttingDown | LifecycleState::Stopped
            ) {
                return;
            }
            *state = LifecycleState::ShuttingDown;
        }
        info!("hotkey service shutting down");

        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .unregister_all(self.backend.as_ref());

        self.backend.request_stop();

        let handle = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(ListenerHandle { thread, done_rx }) = handle {
            match done_rx.recv_timeout(SHUTDOWN_WAIT) {
                Ok(()) => {
                    let _ = thread.join();
                }
                Err(_) => {
                    warn!(
                        wait = ?SHUTDOWN_WAIT,
                        "listening thread did not exit in time, leaving it detached"
                    );
                }
            }
        }

        self.observers.clear();
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = LifecycleState::Stopped;
        info!("hotkey service stopped");
    }

    /// Called by the listening thread when the event loop returns.
    fn note_listener_exit(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != LifecycleState::ShuttingDown {
            error!(state = %*state, "listening thread exited unexpectedly, service is dead");
            self.died.store(true, Ordering::SeqCst);
            *state = LifecycleState::Stopped;
        }
    }

    fn ensure_running(&self) -> Result<(), Error> {
        if self.has_died() {
            return Err(Error::ListenerExited);
        }
        let state = self.state();
        if state != LifecycleState::Running {
            return Err(Error::NotRunning { state });
        }
        Ok(())
    }
}

/// Guarded one-time initialization gate for a process-wide service.
///
/// The application owns the cell, typically in a `static`. Every `acquire`
/// returns the same handle until `shutdown` empties the cell; concurrent
/// acquires serialize on the gate, so exactly one listening thread is
/// created per lifetime.
pub struct ServiceCell {
    slot: Mutex<Option<Arc<HotkeyService>>>,
}

impl ServiceCell {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Current lifecycle state; `Uninitialized` when no service exists.
    pub fn state(&self) -> LifecycleState {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|service| service.state())
            .unwrap_or(LifecycleState::Uninitialized)
    }

    /// Return the shared handle, constructing and starting the service on
    /// first use. The factory is only invoked when no service exists.
    ///
    /// If the listening thread has died the dead handle is not returned;
    /// the caller gets `ListenerExited` and must `shutdown` to reset.
    pub fn acquire<F>(&self, backend: F) -> Result<Arc<HotkeyService>, Error>
    where
        F: FnOnce() -> Arc<dyn NativeBackend>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(service) = slot.as_ref() {
            if service.has_died() {
                return Err(Error::ListenerExited);
            }
            return Ok(Arc::clone(service));
        }

        let service = HotkeyService::start(backend())?;
        *slot = Some(Arc::clone(&service));
        Ok(service)
    }

    /// Tear down the service if one exists, then empty the cell so the next
    /// acquire rebuilds from scratch. A no-op when never started.
    pub fn shutdown(&self) {
        let service = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(service) = service {
            service.shutdown();
        }
    }
}

impl Default for ServiceCell {
    fn default() -> Self {
        Self::new()
    }
}

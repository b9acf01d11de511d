//! Observer set and event dispatch
//!
//! Firings are fanned out synchronously on the listening thread, in
//! registration order. Dispatch iterates an immutable snapshot of the
//! observer list, so observers can be added or removed from any thread,
//! including from inside a callback, without corrupting iteration.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::error;

/// Receives hotkey notifications, and optionally debug diagnostics.
///
/// `on_hotkey` runs on the listening thread; keep callbacks short, since the
/// next native event is not processed until dispatch completes.
pub trait HotkeyObserver: Send + Sync {
    /// Called once per firing of a registered hotkey.
    fn on_hotkey(&self, id: i32);

    /// Whether this observer supplies its own debug sink.
    fn wants_debug(&self) -> bool {
        false
    }

    /// Receives normalized debug messages while debug output is enabled,
    /// if [`wants_debug`](Self::wants_debug) returns true.
    fn on_debug_message(&self, _message: &str) {}
}

type Snapshot = Arc<Vec<Arc<dyn HotkeyObserver>>>;

/// Registration-ordered, copy-on-write observer list.
///
/// Mutations publish a new snapshot; readers hold the previous one for as
/// long as their iteration takes.
pub(crate) struct ObserverSet {
    inner: RwLock<Snapshot>,
}

impl ObserverSet {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub(crate) fn add(&self, observer: Arc<dyn HotkeyObserver>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = inner.as_ref().clone();
        next.push(observer);
        *inner = Arc::new(next);
    }

    /// Remove an observer by pointer identity. Returns whether it was found.
    pub(crate) fn remove(&self, observer: &Arc<dyn HotkeyObserver>) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = inner.as_ref().clone();
        let before = next.len();
        next.retain(|o| !Arc::ptr_eq(o, observer));
        let removed = next.len() != before;
        if removed {
            *inner = Arc::new(next);
        }
        removed
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *inner = Arc::new(Vec::new());
    }

    fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Notify every observer of a firing, in registration order.
    ///
    /// A panicking observer is isolated: the panic is caught, reported, and
    /// delivery continues with the next observer.
    pub(crate) fn dispatch(&self, id: i32) {
        for observer in self.snapshot().iter() {
            let delivery = catch_unwind(AssertUnwindSafe(|| observer.on_hotkey(id)));
            if delivery.is_err() {
                error!(id, "hotkey observer panicked during dispatch");
                crate::debug::emit_with(self, || {
                    format!("observer panicked while handling hotkey id={id}")
                });
            }
        }
    }

    /// Deliver a normalized debug message to every debug-capable observer.
    /// Returns whether at least one observer took it.
    pub(crate) fn debug_broadcast(&self, message: &str) -> bool {
        let mut delivered = false;
        for observer in self.snapshot().iter() {
            if observer.wants_debug() {
                let delivery =
                    catch_unwind(AssertUnwindSafe(|| observer.on_debug_message(message)));
                if delivery.is_err() {
                    error!("debug observer panicked");
                }
                delivered = true;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<(&'static str, i32)>>>,
    }

    impl HotkeyObserver for Recorder {
        fn on_hotkey(&self, id: i32) {
            self.log.lock().unwrap().push((self.label, id));
        }
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let set = ObserverSet::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for label in ["a", "b", "c"] {
            set.add(Arc::new(Recorder {
                label,
                log: Arc::clone(&log),
            }));
        }

        set.dispatch(5);
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &[("a", 5), ("b", 5), ("c", 5)]
        );
    }

    #[test]
    fn test_remove_by_identity() {
        let set = ObserverSet::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let kept: Arc<dyn HotkeyObserver> = Arc::new(Recorder {
            label: "kept",
            log: Arc::clone(&log),
        });
        let dropped: Arc<dyn HotkeyObserver> = Arc::new(Recorder {
            label: "dropped",
            log: Arc::clone(&log),
        });

        set.add(Arc::clone(&kept));
        set.add(Arc::clone(&dropped));
        assert!(set.remove(&dropped));
        assert!(!set.remove(&dropped));

        set.dispatch(1);
        assert_eq!(log.lock().unwrap().as_slice(), &[("kept", 1)]);
    }

    struct SelfRemoving {
        set: Arc<ObserverSet>,
        this: Mutex<Option<Arc<dyn HotkeyObserver>>>,
        fired: AtomicUsize,
    }

    impl HotkeyObserver for SelfRemoving {
        fn on_hotkey(&self, _id: i32) {
            self.fired.fetch_add(1, Ordering::SeqCst);
            if let Some(this) = self.this.lock().unwrap().take() {
                self.set.remove(&this);
            }
        }
    }

    #[test]
    fn test_observer_may_remove_itself_during_dispatch() {
        let set = Arc::new(ObserverSet::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let observer = Arc::new(SelfRemoving {
            set: Arc::clone(&set),
            this: Mutex::new(None),
            fired: AtomicUsize::new(0),
        });
        let as_dyn: Arc<dyn HotkeyObserver> = observer.clone();
        *observer.this.lock().unwrap() = Some(Arc::clone(&as_dyn));

        set.add(as_dyn);
        set.add(Arc::new(Recorder {
            label: "after",
            log: Arc::clone(&log),
        }));

        set.dispatch(9);
        // Both observers saw the firing that triggered the removal.
        assert_eq!(observer.fired.load(Ordering::SeqCst), 1);
        assert_eq!(log.lock().unwrap().as_slice(), &[("after", 9)]);

        set.dispatch(9);
        assert_eq!(observer.fired.load(Ordering::SeqCst), 1);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    struct Panicking;

    impl HotkeyObserver for Panicking {
        fn on_hotkey(&self, _id: i32) {
            panic!("observer blew up");
        }
    }

    #[test]
    fn test_panicking_observer_does_not_block_later_observers() {
        let set = ObserverSet::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        set.add(Arc::new(Panicking));
        set.add(Arc::new(Recorder {
            label: "survivor",
            log: Arc::clone(&log),
        }));

        set.dispatch(3);
        assert_eq!(log.lock().unwrap().as_slice(), &[("survivor", 3)]);
    }

    #[test]
    fn test_clear_empties_the_set() {
        let set = ObserverSet::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        set.add(Arc::new(Recorder {
            label: "a",
            log: Arc::clone(&log),
        }));

        set.clear();
        assert!(set.snapshot().is_empty());
        set.dispatch(1);
        assert!(log.lock().unwrap().is_empty());
    }
}

//! Toggle events and the listener hub that delivers them.
//!
//! Listeners are invoked synchronously, in registration order, on the thread
//! that dispatches the event. A panicking listener is contained: the panic is
//! caught, reported in the [`DispatchReport`], and the remaining listeners
//! still run.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use log::{trace, warn};

use crate::error::extract_panic_message;
use crate::state::SlideTabId;

/// Published when a slide tab accepts an expand or collapse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleEvent {
    /// The slide tab that changed state.
    pub source: SlideTabId,
    /// True when the transition was triggered from the client side
    /// (tab click or outside click).
    pub from_client: bool,
    /// The state after the transition.
    pub expanded: bool,
}

impl ToggleEvent {
    pub fn new(source: SlideTabId, from_client: bool, expanded: bool) -> Self {
        Self {
            source,
            from_client,
            expanded,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_from_client(&self) -> bool {
        self.from_client
    }
}

/// Identifier of one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Boxed listener callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Listener callback for toggle events.
pub type ToggleListener = Listener<ToggleEvent>;

/// A listener that panicked during one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub listener: ListenerId,
    pub message: String,
}

/// Outcome of a single dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that were invoked, including the ones that panicked.
    pub invoked: usize,
    /// Listeners that panicked.
    pub failures: Vec<ListenerFailure>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct ListenerList<E> {
    entries: Mutex<Vec<(ListenerId, Listener<E>)>>,
}

impl<E> ListenerList<E> {
    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener<E>)>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.lock().iter().any(|(entry, _)| *entry == id)
    }
}

/// Type-erased removal, so [`Registration`] does not carry the event type.
trait Detach: Send + Sync {
    fn detach(&self, id: ListenerId) -> bool;
}

impl<E: 'static> Detach for ListenerList<E> {
    fn detach(&self, id: ListenerId) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }
}

/// Handle returned by [`EventHub::add_listener`].
///
/// Dropping the handle keeps the listener registered.
pub struct Registration {
    id: ListenerId,
    list: Weak<dyn Detach>,
}

impl Registration {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove exactly this listener.
    ///
    /// Returns true the first time; later calls are no-ops returning false.
    pub fn unregister(&self) -> bool {
        match self.list.upgrade() {
            Some(list) => list.detach(self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Registers listeners and fires events to them.
pub struct EventHub<E> {
    list: Arc<ListenerList<E>>,
}

impl<E: 'static> EventHub<E> {
    pub fn new() -> Self {
        Self {
            list: Arc::new(ListenerList {
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a listener. It receives every event dispatched after this call.
    pub fn add_listener<F>(&self, listener: F) -> Registration
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.add_shared(Arc::new(listener))
    }

    /// Register an already shared listener.
    pub fn add_shared(&self, listener: Listener<E>) -> Registration {
        let id = ListenerId::new();
        self.list.lock().push((id, listener));
        trace!("Registered listener {}", id);

        let list: Arc<dyn Detach> = self.list.clone();
        Registration {
            id,
            list: Arc::downgrade(&list),
        }
    }

    pub fn len(&self) -> usize {
        self.list.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every registered listener with `event`.
    ///
    /// The listener set is snapshotted first and no lock is held while a
    /// listener runs, so listeners may register or unregister listeners
    /// (themselves included). A listener removed during the dispatch is
    /// skipped if it has not been reached yet.
    pub fn dispatch(&self, event: &E) -> DispatchReport {
        let snapshot: Vec<(ListenerId, Listener<E>)> = self.list.lock().clone();
        let mut report = DispatchReport::default();

        for (id, listener) in snapshot {
            if !self.list.contains(id) {
                trace!("Listener {} removed mid-dispatch, skipping", id);
                continue;
            }

            report.invoked += 1;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| listener(event))) {
                let message = extract_panic_message(&panic);
                warn!("Listener {} panicked: {}", id, message);
                report.failures.push(ListenerFailure {
                    listener: id,
                    message,
                });
            }
        }

        report
    }
}

impl<E: 'static> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.list.lock().len())
            .finish()
    }
}

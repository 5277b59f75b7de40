//! Tests for listener registration and dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use slidetab::event::{EventHub, Registration};
use slidetab::owner;
use slidetab::prelude::*;

// =============================================================================
// Ordering and registration
// =============================================================================

#[test]
fn test_dispatch_in_registration_order() {
    let hub: EventHub<u32> = EventHub::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for tag in ["a", "b", "c"] {
        let order = order.clone();
        hub.add_listener(move |value: &u32| order.lock().unwrap().push((tag, *value)));
    }

    let report = hub.dispatch(&7);

    assert_eq!(report.invoked, 3);
    assert!(report.is_clean());
    assert_eq!(*order.lock().unwrap(), vec![("a", 7), ("b", 7), ("c", 7)]);
}

#[test]
fn test_unregister_is_idempotent() {
    let hub: EventHub<()> = EventHub::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let registration = hub.add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let other = hub.add_listener(|_| {});

    assert!(registration.unregister());
    assert!(!registration.unregister());
    assert_eq!(hub.len(), 1);

    hub.dispatch(&());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(other.unregister());
    assert!(hub.is_empty());
}

#[test]
fn test_unregister_after_hub_dropped() {
    let hub: EventHub<()> = EventHub::new();
    let registration = hub.add_listener(|_| {});
    drop(hub);

    assert!(!registration.unregister());
}

#[test]
fn test_registration_ids_are_distinct() {
    let hub: EventHub<()> = EventHub::new();
    let first = hub.add_listener(|_| {});
    let second = hub.add_listener(|_| {});

    assert_ne!(first.id(), second.id());
}

// =============================================================================
// Mutation during dispatch
// =============================================================================

#[test]
fn test_listener_unregisters_itself_mid_dispatch() {
    let hub: EventHub<u32> = EventHub::new();
    let slot: Arc<OnceLock<Registration>> = Arc::new(OnceLock::new());
    let self_calls = Arc::new(AtomicUsize::new(0));
    let after_calls = Arc::new(AtomicUsize::new(0));

    let own = slot.clone();
    let counter = self_calls.clone();
    let registration = hub.add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(registration) = own.get() {
            registration.unregister();
        }
    });
    slot.set(registration).unwrap();

    let counter = after_calls.clone();
    hub.add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let report = hub.dispatch(&1);
    assert_eq!(report.invoked, 2);
    hub.dispatch(&2);

    assert_eq!(self_calls.load(Ordering::SeqCst), 1);
    assert_eq!(after_calls.load(Ordering::SeqCst), 2);
    assert_eq!(hub.len(), 1);
}

#[test]
fn test_listener_removed_mid_dispatch_is_skipped() {
    let hub: EventHub<()> = EventHub::new();
    let victim: Arc<OnceLock<Registration>> = Arc::new(OnceLock::new());
    let victim_calls = Arc::new(AtomicUsize::new(0));

    let target = victim.clone();
    hub.add_listener(move |_| {
        if let Some(registration) = target.get() {
            registration.unregister();
        }
    });

    let counter = victim_calls.clone();
    let registration = hub.add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    victim.set(registration).unwrap();

    let report = hub.dispatch(&());

    assert_eq!(report.invoked, 1);
    assert_eq!(victim_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_listener_added_mid_dispatch_waits_for_next_event() {
    let hub: Arc<EventHub<u32>> = Arc::new(EventHub::new());
    let late_calls = Arc::new(Mutex::new(Vec::new()));

    let inner = hub.clone();
    let sink = late_calls.clone();
    let added = AtomicUsize::new(0);
    hub.add_listener(move |_| {
        if added.fetch_add(1, Ordering::SeqCst) == 0 {
            let sink = sink.clone();
            inner.add_listener(move |value: &u32| sink.lock().unwrap().push(*value));
        }
    });

    hub.dispatch(&1);
    hub.dispatch(&2);

    assert_eq!(*late_calls.lock().unwrap(), vec![2]);
}

// =============================================================================
// Failure containment
// =============================================================================

#[test]
fn test_panicking_listener_does_not_stop_dispatch() {
    let hub: EventHub<()> = EventHub::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let first = calls.clone();
    hub.add_listener(move |_| {
        first.fetch_add(1, Ordering::SeqCst);
    });
    let failing = hub.add_listener(|_| panic!("listener exploded"));
    let last = calls.clone();
    hub.add_listener(move |_| {
        last.fetch_add(1, Ordering::SeqCst);
    });

    let report = hub.dispatch(&());

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(report.invoked, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].listener, failing.id());
    assert_eq!(report.failures[0].message, "listener exploded");
}

#[test]
fn test_listener_failure_keeps_transition_and_reaches_hook() {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = errors.clone();
    let after = Arc::new(AtomicUsize::new(0));
    let counter = after.clone();

    let (handle, _owner_loop) = owner::channel();
    let tab = SlideTabBuilder::new("content", "Caption")
        .listener(|_| panic!("bad listener"))
        .listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .on_listener_error(move |error: &ListenerError| sink.lock().unwrap().push(error.clone()))
        .build(RecordingView::new(), handle)
        .unwrap();

    assert!(tab.expand());

    assert!(tab.is_expanded());
    assert_eq!(after.load(Ordering::SeqCst), 1);
    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].widget, tab.id());
    assert_eq!(errors[0].message, "bad listener");
    assert!(errors[0].to_string().contains("bad listener"));
}

#[test]
fn test_tab_listener_registration_handle() {
    let (handle, _owner_loop) = owner::channel();
    let tab = SlideTabBuilder::new("content", "Caption")
        .build(RecordingView::new(), handle)
        .unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let registration = tab.add_toggle_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(tab.listener_count(), 1);

    tab.expand();
    registration.unregister();
    tab.collapse();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(tab.listener_count(), 0);
}

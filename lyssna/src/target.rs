//! # Event Target
//!
//! The addressable owner of listener registrations.
//!
//! All methods take `&self`: the per-target registry lives behind a
//! `parking_lot::Mutex`, and the lock is never held while a callback runs.
//! Share a target across callbacks or threads by wrapping it in `Arc`.

use crate::{
    dispatch::{self, DispatchReport},
    registry::Registry,
};
use lyssna_core::{CallbackRef, Event, ListenerOptions, RegisterError};
use parking_lot::Mutex;

/// An addressable owner of zero or more per-event-type listener lists.
///
/// # Example
///
/// ```
/// use lyssna::{CallbackRef, Event, EventTarget, ListenerOptions};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let target = EventTarget::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = hits.clone();
/// let listener = CallbackRef::from_fn(move |_event| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// target.add_listener("ping", listener, ListenerOptions::new()).unwrap();
///
/// let mut event = Event::new("ping");
/// assert!(target.dispatch(&mut event));
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct EventTarget {
    registry: Mutex<Registry>,
}

impl EventTarget {
    /// Create a target with no listeners.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
        }
    }

    /// Register `callback` for `event_type`.
    ///
    /// A registration whose `(callback identity, capture)` pair is already
    /// present is a success no-op; the existing entry keeps its original
    /// modifiers. The only hard failure is an empty event type.
    pub fn add_listener(
        &self,
        event_type: &str,
        callback: CallbackRef,
        options: ListenerOptions,
    ) -> Result<(), RegisterError> {
        if event_type.is_empty() {
            return Err(RegisterError::EmptyEventType);
        }
        let inserted = self.registry.lock().add(event_type, callback, options);
        if !inserted {
            tracing::trace!(event_type, "duplicate listener registration ignored");
        }
        Ok(())
    }

    /// Remove the listener matching `(callback identity, capture)`.
    ///
    /// Removing an absent listener is a silent no-op. A listener removed
    /// while a dispatch is in flight is skipped by that dispatch if it has
    /// not run yet.
    pub fn remove_listener(&self, event_type: &str, callback: &CallbackRef, capture: bool) {
        self.registry.lock().remove(event_type, callback, capture);
    }

    /// Whether the `(callback identity, capture)` pair is registered.
    pub fn has_listener(&self, event_type: &str, callback: &CallbackRef, capture: bool) -> bool {
        self.registry.lock().contains(event_type, callback, capture)
    }

    /// Number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.registry.lock().len(event_type)
    }

    /// Deliver `event` to this target's matching listeners in registration
    /// order.
    ///
    /// Returns `false` exactly when the event is cancelable and a
    /// non-passive listener prevented its default action. Listener
    /// failures are reported through `tracing` and do not affect delivery
    /// to subsequent listeners; use [`EventTarget::dispatch_with_report`]
    /// to receive them.
    pub fn dispatch(&self, event: &mut Event) -> bool {
        dispatch::deliver(&self.registry, event).proceed
    }

    /// Like [`EventTarget::dispatch`], but hands back the per-listener
    /// failures alongside the default-action verdict.
    pub fn dispatch_with_report(&self, event: &mut Event) -> DispatchReport {
        dispatch::deliver(&self.registry, event)
    }
}

impl Default for EventTarget {
    fn default() -> Self {
        Self::new()
    }
}

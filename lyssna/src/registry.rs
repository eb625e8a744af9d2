//! # Subscription Registry
//!
//! Per-target, per-event-type ordered collections of listener entries.
//!
//! The registry owns add/remove/dedup logic and produces the frozen
//! snapshots the dispatch engine iterates. Entries are stored behind `Arc`
//! with a per-entry tombstone flag, so a snapshot taken at dispatch start
//! can re-check liveness per entry instead of rebuilding the live list
//! when a callback mutates the registry mid-iteration.
//!
//! Ordering rules:
//! - entries fire in registration order; capturing and non-capturing
//!   entries are interleaved exactly as they were added
//! - removal splices the live list but never re-orders it
//! - entries added during a dispatch are absent from that dispatch's
//!   snapshot and fire from the next dispatch on

use lyssna_core::{CallbackRef, ListenerOptions};
use std::collections::HashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

// ============================================================================
// ListenerEntry
// ============================================================================

/// One registered listener: callback identity, modifiers, and a tombstone.
///
/// Entries are shared between the live list and any in-flight dispatch
/// snapshots; the tombstone is how a snapshot observes removals that
/// happened after it was taken.
pub struct ListenerEntry {
    callback: CallbackRef,
    options: ListenerOptions,
    removed: AtomicBool,
}

impl ListenerEntry {
    fn new(callback: CallbackRef, options: ListenerOptions) -> Arc<Self> {
        Arc::new(Self {
            callback,
            options,
            removed: AtomicBool::new(false),
        })
    }

    /// The registered callback.
    pub fn callback(&self) -> &CallbackRef {
        &self.callback
    }

    /// The modifiers fixed at registration time.
    pub fn options(&self) -> ListenerOptions {
        self.options
    }

    /// Whether this entry has been removed since the snapshot holding it
    /// was taken.
    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }

    /// Flip the tombstone, returning `true` when this call performed the
    /// removal. At most one caller ever observes `true`, which is what
    /// makes one-shot removal exact under concurrent dispatch.
    fn claim_removal(&self) -> bool {
        !self.removed.fetch_or(true, Ordering::AcqRel)
    }

    fn matches(&self, callback: &CallbackRef, capture: bool) -> bool {
        self.options.capture == capture && self.callback.same_callback(callback)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered listener lists keyed by event type.
///
/// The registry itself is not synchronized; the owning target wraps it in
/// a mutex and holds that lock only for registry operations, never across
/// a callback invocation.
pub struct Registry {
    listeners: HashMap<Box<str>, Vec<Arc<ListenerEntry>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Append a listener for `event_type` unless an entry with the same
    /// `(callback identity, capture)` pair already exists.
    ///
    /// Returns `false` for the duplicate case: the list and its order are
    /// untouched and the existing entry keeps its original `once`/`passive`
    /// modifiers, even when the new options differ.
    pub fn add(&mut self, event_type: &str, callback: CallbackRef, options: ListenerOptions) -> bool {
        if let Some(list) = self.listeners.get_mut(event_type) {
            if list.iter().any(|e| e.matches(&callback, options.capture)) {
                return false;
            }
            list.push(ListenerEntry::new(callback, options));
        } else {
            self.listeners
                .insert(event_type.into(), vec![ListenerEntry::new(callback, options)]);
        }
        true
    }

    /// Remove the entry matching `(callback identity, capture)`.
    ///
    /// The entry is tombstoned (so in-flight snapshots skip it) and
    /// spliced out of the live list. Returns `false` when absent, which is
    /// not an error.
    pub fn remove(&mut self, event_type: &str, callback: &CallbackRef, capture: bool) -> bool {
        let Some(list) = self.listeners.get_mut(event_type) else {
            return false;
        };
        let Some(pos) = list.iter().position(|e| e.matches(callback, capture)) else {
            return false;
        };
        let entry = list.remove(pos);
        entry.claim_removal();
        if list.is_empty() {
            self.listeners.remove(event_type);
        }
        true
    }

    /// Presence check for the `(callback identity, capture)` pair.
    pub fn contains(&self, event_type: &str, callback: &CallbackRef, capture: bool) -> bool {
        self.listeners
            .get(event_type)
            .is_some_and(|list| list.iter().any(|e| e.matches(callback, capture)))
    }

    /// Claim and remove `entry` by identity, for one-shot listeners.
    ///
    /// Returns `false` when the entry was already removed, in which case
    /// the caller must not invoke it.
    pub fn take_entry(&mut self, event_type: &str, entry: &Arc<ListenerEntry>) -> bool {
        if !entry.claim_removal() {
            return false;
        }
        if let Some(list) = self.listeners.get_mut(event_type) {
            if let Some(pos) = list.iter().position(|e| Arc::ptr_eq(e, entry)) {
                list.remove(pos);
                if list.is_empty() {
                    self.listeners.remove(event_type);
                }
            }
        }
        true
    }

    /// A frozen, ordered view of the live list for `event_type`.
    ///
    /// Returns `None` without allocating when the type has no listeners —
    /// the dispatch fast path. The returned snapshot shares entries with
    /// the live list; liveness is re-checked per entry via the tombstone.
    pub fn snapshot(&self, event_type: &str) -> Option<Vec<Arc<ListenerEntry>>> {
        match self.listeners.get(event_type) {
            Some(list) if !list.is_empty() => Some(list.clone()),
            _ => None,
        }
    }

    /// Number of live listeners for `event_type`.
    pub fn len(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, Vec::len)
    }

    /// Whether no listeners are registered for any event type.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use lyssna_core::{CallbackRef, ListenerOptions};

    fn noop() -> CallbackRef {
        CallbackRef::from_fn(|_| {})
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut registry = Registry::new();
        let cb = noop();

        assert!(registry.add("test", cb.clone(), ListenerOptions::new()));
        assert!(!registry.add("test", cb.clone(), ListenerOptions::new()));
        assert_eq!(registry.len("test"), 1);
    }

    #[test]
    fn test_first_registration_options_win() {
        let mut registry = Registry::new();
        let cb = noop();

        registry.add("test", cb.clone(), ListenerOptions::new().with_once(true));
        registry.add("test", cb.clone(), ListenerOptions::new());

        let snapshot = registry.snapshot("test").expect("one entry");
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].options().once, "first registration's once must win");
    }

    #[test]
    fn test_capture_participates_in_identity() {
        let mut registry = Registry::new();
        let cb = noop();

        assert!(registry.add("test", cb.clone(), ListenerOptions::new()));
        assert!(registry.add("test", cb.clone(), ListenerOptions::new().with_capture(true)));
        assert_eq!(registry.len("test"), 2);

        registry.remove("test", &cb, true);
        assert_eq!(registry.len("test"), 1);
        assert!(registry.contains("test", &cb, false));
        assert!(!registry.contains("test", &cb, true));
    }

    #[test]
    fn test_remove_tombstones_snapshot_entries() {
        let mut registry = Registry::new();
        let cb = noop();
        registry.add("test", cb.clone(), ListenerOptions::new());

        let snapshot = registry.snapshot("test").expect("one entry");
        assert!(!snapshot[0].is_removed());

        registry.remove("test", &cb, false);
        assert!(snapshot[0].is_removed());
        assert!(registry.snapshot("test").is_none(), "empty type key is dropped");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = Registry::new();
        assert!(!registry.remove("test", &noop(), false));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_take_entry_claims_once() {
        let mut registry = Registry::new();
        registry.add("test", noop(), ListenerOptions::new().with_once(true));
        let snapshot = registry.snapshot("test").expect("one entry");

        assert!(registry.take_entry("test", &snapshot[0]));
        assert!(!registry.take_entry("test", &snapshot[0]), "second claim must lose");
        assert_eq!(registry.len("test"), 0);
    }

    #[test]
    fn test_snapshot_fast_path() {
        let registry = Registry::new();
        assert!(registry.snapshot("never-registered").is_none());
    }
}

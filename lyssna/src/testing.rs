//! Testing utilities for Lyssna.
//!
//! Reusable callbacks for exercising dispatch behavior in tests:
//!
//! - [`CountingCallback`]: counts invocations
//! - [`RecordingCallback`]: records the event types it observes
//! - [`FailingCallback`]: always returns an error
//! - [`PanickingCallback`]: always panics
//!
//! Each is `Clone` and shares its observation state, so a test can keep
//! one handle for assertions while the clone is registered.

use lyssna_core::{BoxError, Callback, Event};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Counting Callback
// ============================================================================

/// A callback that counts its invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingCallback::new();
/// target.add_listener("test", CallbackRef::new(counter.clone()), opts)?;
///
/// target.dispatch(&mut event);
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingCallback {
    count: Arc<AtomicUsize>,
}

impl CountingCallback {
    /// Create a new counting callback.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current invocation count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingCallback {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl Callback for CountingCallback {
    fn invoke(&self, _event: &mut Event) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Recording Callback
// ============================================================================

/// A callback that records the event types it is invoked with.
pub struct RecordingCallback {
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingCallback {
    /// Create a new recording callback.
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded event types, in invocation order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    /// Get the number of recorded invocations.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Clear all recorded invocations.
    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

impl Default for RecordingCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingCallback {
    fn clone(&self) -> Self {
        Self {
            seen: self.seen.clone(),
        }
    }
}

impl Callback for RecordingCallback {
    fn invoke(&self, event: &mut Event) -> Result<(), BoxError> {
        self.seen.lock().unwrap().push(event.event_type().to_owned());
        Ok(())
    }
}

// ============================================================================
// Failing Callback
// ============================================================================

/// A callback that always fails with the given message.
pub struct FailingCallback {
    message: String,
}

impl FailingCallback {
    /// Create a callback that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Callback for FailingCallback {
    fn invoke(&self, _event: &mut Event) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Panicking Callback
// ============================================================================

/// A callback that always panics with the given message.
pub struct PanickingCallback {
    message: String,
}

impl PanickingCallback {
    /// Create a callback that panics with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Callback for PanickingCallback {
    fn invoke(&self, _event: &mut Event) -> Result<(), BoxError> {
        panic!("{}", self.message);
    }
}

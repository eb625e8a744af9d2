//! # Callback Abstraction
//!
//! The invocable unit a listener entry stores, and the identity wrapper
//! the registry compares entries by.
//!
//! Registration and removal match on *identity*, never on value: two
//! closures with identical bodies are distinct listeners, while clones of
//! one [`CallbackRef`] all name the same listener. This mirrors how the
//! registry's dedup and removal contracts are specified.

use crate::{error::BoxError, event::Event};
use std::fmt;
use std::sync::Arc;

/// An invocable event listener.
///
/// Implementations receive the event mutably and may set its propagation
/// or default flags. Returning an `Err` marks this listener as failed for
/// the current dispatch; the failure is isolated and delivery continues
/// with the next listener.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Callback`",
    label = "missing `Callback` implementation",
    note = "Callbacks must implement `invoke(&self, &mut Event) -> Result<(), BoxError>`."
)]
pub trait Callback: Send + Sync + 'static {
    /// Called once per matching dispatch.
    fn invoke(&self, event: &mut Event) -> Result<(), BoxError>;
}

// Any fallible closure over the event is a Callback.
impl<F> Callback for F
where
    F: Fn(&mut Event) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn invoke(&self, event: &mut Event) -> Result<(), BoxError> {
        self(event)
    }
}

/// Adapter for infallible closures.
struct FnCallback<F>(F);

impl<F> Callback for FnCallback<F>
where
    F: Fn(&mut Event) + Send + Sync + 'static,
{
    fn invoke(&self, event: &mut Event) -> Result<(), BoxError> {
        (self.0)(event);
        Ok(())
    }
}

/// A reference-counted callback handle compared by pointer identity.
///
/// Cloning is O(1) and preserves identity, so the same `CallbackRef` can
/// be handed to `add_listener` and later to `remove_listener`.
///
/// # Example
///
/// ```
/// use lyssna_core::CallbackRef;
///
/// let a = CallbackRef::from_fn(|_event| {});
/// let b = a.clone();
/// let c = CallbackRef::from_fn(|_event| {});
/// assert!(a.same_callback(&b));
/// assert!(!a.same_callback(&c));
/// ```
pub struct CallbackRef(Arc<dyn Callback>);

impl CallbackRef {
    /// Wrap a [`Callback`] implementation.
    pub fn new<C: Callback>(callback: C) -> Self {
        Self(Arc::new(callback))
    }

    /// Wrap an infallible closure.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&mut Event) + Send + Sync + 'static,
    {
        Self(Arc::new(FnCallback(callback)))
    }

    /// Wrap a fallible closure.
    pub fn from_try_fn<F>(callback: F) -> Self
    where
        F: Fn(&mut Event) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Whether `self` and `other` name the same registered callback.
    pub fn same_callback(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Invoke the underlying callback.
    pub fn invoke(&self, event: &mut Event) -> Result<(), BoxError> {
        self.0.invoke(event)
    }
}

impl Clone for CallbackRef {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl PartialEq for CallbackRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_callback(other)
    }
}

impl Eq for CallbackRef {}

impl fmt::Debug for CallbackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallbackRef")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::CallbackRef;
    use crate::event::Event;

    #[test]
    fn test_clone_preserves_identity() {
        let a = CallbackRef::from_fn(|_| {});
        let b = a.clone();
        assert!(a.same_callback(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_closures_are_distinct() {
        let a = CallbackRef::from_fn(|_| {});
        let b = CallbackRef::from_fn(|_| {});
        assert!(!a.same_callback(&b));
    }

    #[test]
    fn test_try_fn_error_is_returned() {
        let cb = CallbackRef::from_try_fn(|_| Err("boom".into()));
        let mut event = Event::new("test");
        assert!(cb.invoke(&mut event).is_err());
    }
}

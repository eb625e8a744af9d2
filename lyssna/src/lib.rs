//! # lyssna - Single-Target Event Dispatch
//!
//! `lyssna` is an in-process event dispatch engine: typed callback
//! registrations attached to an [`EventTarget`], and a delivery algorithm
//! that hands an [`Event`] to the matching listeners in a well-defined
//! order, honoring per-listener modifiers (capture, once, passive) and
//! in-flight mutation of the registry.
//!
//! The hard guarantees live in the dispatch loop: deterministic
//! registration-order delivery, exact one-shot semantics, per-listener
//! failure isolation, safe re-entrancy (a callback may add or remove
//! listeners, or dispatch another event, on the target it is running on),
//! and an allocation-free fast path when an event type has no listeners.
//!
//! ## Quick Start
//!
//! ```
//! use lyssna::{CallbackRef, Event, EventTarget, ListenerOptions};
//!
//! let target = EventTarget::new();
//! let listener = CallbackRef::from_fn(|event| {
//!     if event.is_cancelable() {
//!         event.prevent_default();
//!     }
//! });
//! target.add_listener("submit", listener, ListenerOptions::new()).unwrap();
//!
//! let mut event = Event::new("submit").with_cancelable(true);
//! let proceed = target.dispatch(&mut event);
//! assert!(!proceed);
//! ```
//!
//! Multi-node capture/bubble propagation over an ancestor tree is out of
//! scope: [`EventPhase`] and the capture bit exist so a caller can compose
//! such a walk from repeated single-target dispatches.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod registry;
pub mod target;
pub mod testing;

// Re-exports
pub use lyssna_core::{
    // Errors
    BoxError,
    // Callback
    Callback,
    CallbackError,
    CallbackFailure,
    CallbackRef,
    // Event record
    Event,
    EventError,
    EventPhase,
    ListenerOptions,
    RegisterError,
};

pub use dispatch::DispatchReport;
pub use registry::{ListenerEntry, Registry};
pub use target::EventTarget;

/// Prelude module - common imports for Lyssna.
///
/// # Usage
///
/// ```rust,ignore
/// use lyssna::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{CallbackRef, Event, EventPhase, EventTarget, ListenerOptions};
}

//! # Event Record
//!
//! The mutable record delivered to listeners during a dispatch.
//!
//! An [`Event`] is owned by the caller and borrowed mutably by the engine
//! for the duration of exactly one dispatch call. The `&mut` borrow is load
//! bearing: it makes re-entrant dispatch of the *same* instance impossible
//! at compile time, while leaving the record reusable across sequential
//! dispatches.
//!
//! # Flag Lifetimes
//!
//! Per-dispatch flags (`propagation stopped`, `immediate propagation
//! stopped`, the phase) are reset by [`Event::begin_dispatch`] at the start
//! of every dispatch. The `default prevented` flag accumulates across
//! dispatches of the same instance until the caller calls
//! [`Event::reset_default_prevented`].

use bitflags::bitflags;

bitflags! {
    /// Internal dispatch-state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct EventFlags: u8 {
        /// A listener asked that propagation not continue past this target.
        const PROPAGATION_STOPPED = 1 << 0;
        /// A listener asked that no further listeners run at all.
        const IMMEDIATE_STOPPED = 1 << 1;
        /// A listener prevented the default action.
        const DEFAULT_PREVENTED = 1 << 2;
        /// A passive listener is currently executing; `prevent_default`
        /// must be a no-op.
        const IN_PASSIVE_LISTENER = 1 << 3;
        /// A dispatch is in flight for this instance.
        const DISPATCHING = 1 << 4;
    }
}

/// The phase a dispatch is currently in.
///
/// The single-target engine only ever runs listeners in [`AtTarget`];
/// [`Capturing`] and [`Bubbling`] exist as vocabulary for a caller-level
/// propagation layer that composes multiple single-target dispatches over
/// an ancestor tree.
///
/// [`AtTarget`]: EventPhase::AtTarget
/// [`Capturing`]: EventPhase::Capturing
/// [`Bubbling`]: EventPhase::Bubbling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    /// No dispatch is in flight.
    #[default]
    None,
    /// Descending the ancestor tree toward the target.
    Capturing,
    /// Running listeners on the target itself.
    AtTarget,
    /// Ascending the ancestor tree away from the target.
    Bubbling,
}

/// A mutable, reusable event record.
///
/// # Example
///
/// ```
/// use lyssna_core::Event;
///
/// let mut event = Event::new("submit").with_cancelable(true);
/// event.prevent_default();
/// assert!(event.default_prevented());
/// ```
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    cancelable: bool,
    flags: EventFlags,
    phase: EventPhase,
}

impl Event {
    /// Create a new, non-cancelable event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            cancelable: false,
            flags: EventFlags::empty(),
            phase: EventPhase::None,
        }
    }

    /// Set whether the event's default action can be prevented.
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// The event type this record is dispatched under.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Whether `prevent_default` has any effect on this event.
    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// The current dispatch phase.
    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Whether a dispatch is currently in flight for this instance.
    pub fn is_dispatching(&self) -> bool {
        self.flags.contains(EventFlags::DISPATCHING)
    }

    /// Ask that propagation not continue past the current target.
    ///
    /// Remaining listeners on the *same* target still run; only a
    /// caller-level tree walk observes this flag.
    pub fn stop_propagation(&mut self) {
        self.flags.insert(EventFlags::PROPAGATION_STOPPED);
    }

    /// Ask that no further listeners run, including the rest of the
    /// current target's list.
    pub fn stop_immediate_propagation(&mut self) {
        self.flags
            .insert(EventFlags::PROPAGATION_STOPPED | EventFlags::IMMEDIATE_STOPPED);
    }

    /// Whether `stop_propagation` was called during the current dispatch.
    pub fn propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::PROPAGATION_STOPPED)
    }

    /// Whether `stop_immediate_propagation` was called during the current
    /// dispatch.
    pub fn immediate_propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::IMMEDIATE_STOPPED)
    }

    /// Mark the event's default action as prevented.
    ///
    /// Silently ignored when the event is not cancelable, or while a
    /// passive listener is executing.
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.flags.contains(EventFlags::IN_PASSIVE_LISTENER) {
            self.flags.insert(EventFlags::DEFAULT_PREVENTED);
        }
    }

    /// Whether the default action has been prevented.
    ///
    /// Unlike the propagation flags, this survives across sequential
    /// dispatches of the same instance.
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Clear the accumulated `default prevented` state so the instance can
    /// be re-dispatched fresh.
    pub fn reset_default_prevented(&mut self) {
        self.flags.remove(EventFlags::DEFAULT_PREVENTED);
    }

    // ========================================================================
    // Engine integration points
    // ========================================================================

    /// Reset per-dispatch state at the start of a dispatch pass.
    ///
    /// Clears the stop flags, enters [`EventPhase::AtTarget`], and marks
    /// the instance as dispatching. The `default prevented` flag is left
    /// untouched.
    pub fn begin_dispatch(&mut self) {
        self.flags.remove(
            EventFlags::PROPAGATION_STOPPED
                | EventFlags::IMMEDIATE_STOPPED
                | EventFlags::IN_PASSIVE_LISTENER,
        );
        self.flags.insert(EventFlags::DISPATCHING);
        self.phase = EventPhase::AtTarget;
    }

    /// Leave dispatch state at the end of a dispatch pass.
    pub fn finish_dispatch(&mut self) {
        self.flags
            .remove(EventFlags::DISPATCHING | EventFlags::IN_PASSIVE_LISTENER);
        self.phase = EventPhase::None;
    }

    /// Enter or leave a passive listener scope, during which
    /// [`Event::prevent_default`] is a no-op.
    pub fn set_passive_scope(&mut self, passive: bool) {
        self.flags.set(EventFlags::IN_PASSIVE_LISTENER, passive);
    }
}

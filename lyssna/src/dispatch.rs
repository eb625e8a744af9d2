//! # Dispatch Engine
//!
//! The single-target delivery loop.
//!
//! Given a target's registry and an event record, the engine freezes the
//! invocation order, then walks the snapshot re-checking liveness per
//! entry, so that:
//!
//! - a listener removed by an earlier listener in the same pass never runs
//! - a listener added during the pass waits for the next dispatch
//! - a one-shot listener is removed *before* it runs, even if it then fails
//! - one listener's error or panic never blocks the listeners after it
//!
//! The registry lock is taken only for the snapshot and for one-shot
//! removal; callbacks always run with the lock released, which is what
//! lets them re-enter the target (add, remove, dispatch another event)
//! without deadlocking.

use crate::registry::{ListenerEntry, Registry};
use lyssna_core::{CallbackError, CallbackFailure, Event};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// The outcome of one dispatch pass.
#[derive(Debug)]
pub struct DispatchReport {
    /// Whether the event's default action should proceed. `false` exactly
    /// when the event is cancelable and a non-passive listener prevented
    /// the default.
    pub proceed: bool,
    /// Per-listener failures, in the order they occurred. Empty on the
    /// zero-listener fast path.
    pub failures: Vec<CallbackFailure>,
}

impl DispatchReport {
    /// Whether every invoked listener completed without error.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Deliver `event` to the matching listeners in `registry`.
pub(crate) fn deliver(registry: &Mutex<Registry>, event: &mut Event) -> DispatchReport {
    // Fast path: nothing registered for this type. No snapshot, no flag
    // traffic on the event, no allocation.
    let Some(snapshot) = registry.lock().snapshot(event.event_type()) else {
        return DispatchReport {
            proceed: !event.default_prevented(),
            failures: Vec::new(),
        };
    };

    event.begin_dispatch();
    let mut failures = Vec::new();

    for (index, entry) in snapshot.iter().enumerate() {
        if event.immediate_propagation_stopped() {
            break;
        }
        if entry.is_removed() {
            continue;
        }
        // One-shot entries leave the registry before their callback runs;
        // the removal holds even if the callback fails. A lost claim means
        // someone else removed the entry first.
        if entry.options().once && !registry.lock().take_entry(event.event_type(), entry) {
            continue;
        }
        if let Err(error) = invoke(entry, event) {
            tracing::error!(
                event_type = event.event_type(),
                index,
                %error,
                "event listener failed"
            );
            failures.push(CallbackFailure {
                event_type: event.event_type().to_owned(),
                index,
                error,
            });
        }
    }

    event.finish_dispatch();
    DispatchReport {
        proceed: !event.default_prevented(),
        failures,
    }
}

/// Run one callback with passive scoping and panic isolation.
fn invoke(entry: &ListenerEntry, event: &mut Event) -> Result<(), CallbackError> {
    let passive = entry.options().passive;
    if passive {
        event.set_passive_scope(true);
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| entry.callback().invoke(event)));
    if passive {
        event.set_passive_scope(false);
    }
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(CallbackError::Failed(err)),
        Err(payload) => Err(CallbackError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_owned()
    }
}

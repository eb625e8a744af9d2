//! Error types for Lyssna.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`EventError`] - Top-level error type for all Lyssna operations
//! - [`RegisterError`] - Errors surfaced synchronously at registration
//! - [`CallbackError`] - Errors from individual listener callbacks
//!
//! Dispatch itself never fails hard: callback failures are contained per
//! listener and reported as [`CallbackFailure`] records, and no-op
//! conditions (duplicate add, absent remove, zero-listener dispatch) are
//! successes.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Lyssna operations.
#[derive(Error, Debug)]
pub enum EventError {
    /// An error occurred while registering a listener.
    #[error("registration error: {0}")]
    Register(#[from] RegisterError),

    /// An error occurred in a listener callback.
    #[error("callback error: {0}")]
    Callback(#[from] CallbackError),
}

/// Errors surfaced synchronously to the caller of `add_listener`.
///
/// These are the only hard failures in the system; the registry is left
/// unchanged when one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// The event type string was empty.
    #[error("event type must not be empty")]
    EmptyEventType,
}

/// Errors from a single listener callback during dispatch.
///
/// Failures are isolated: one misbehaving listener never prevents
/// delivery to subsequent listeners and never unwinds the dispatch loop.
#[derive(Error, Debug)]
pub enum CallbackError {
    /// The callback returned an error.
    #[error(transparent)]
    Failed(BoxError),

    /// The callback panicked during execution.
    #[error("listener panicked: {0}")]
    Panicked(String),
}

/// One listener's failure during a dispatch pass.
///
/// Collected into the dispatch report in the order failures occurred.
#[derive(Error, Debug)]
#[error("listener #{index} for \"{event_type}\": {error}")]
pub struct CallbackFailure {
    /// The event type the failing listener was registered under.
    pub event_type: String,
    /// The listener's position in the frozen dispatch order.
    pub index: usize,
    /// What went wrong.
    #[source]
    pub error: CallbackError,
}

impl From<BoxError> for CallbackError {
    fn from(err: BoxError) -> Self {
        CallbackError::Failed(err)
    }
}

//! # lyssna-core
//!
//! Core vocabulary for the Lyssna event dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that only needs the event/callback types without the full `lyssna`
//! engine (for example, a caller-level propagation layer composing several
//! single-target dispatches).
//!
//! # Two-Component Architecture
//!
//! Lyssna is built from two components in strict dependency order:
//!
//! ## Component 1: Subscription Registry
//!
//! A per-target, per-event-type ordered collection of listener entries.
//! Owns add/remove/dedup logic. Lives in the `lyssna` crate; this crate
//! supplies the vocabulary it stores: [`CallbackRef`] identities and
//! [`ListenerOptions`] modifiers.
//!
//! ## Component 2: Dispatch Engine
//!
//! Given a target's registry and an [`Event`] record, computes the ordered
//! invocation list, executes it with mutation safety and failure isolation,
//! and updates the event's propagation/default flags. Also in `lyssna`;
//! this crate supplies the [`Event`] record the engine reads flags from and
//! mutates.
//!
//! # Error Types
//!
//! - [`EventError`] - Top-level error type
//! - [`RegisterError`] - Registration-time errors
//! - [`CallbackError`] - Listener execution errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod error;
mod event;
mod options;

// Re-exports
pub use callback::{Callback, CallbackRef};
pub use error::{BoxError, CallbackError, CallbackFailure, EventError, RegisterError};
pub use event::{Event, EventPhase};
pub use options::ListenerOptions;

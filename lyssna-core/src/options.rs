//! Listener registration options.

/// Modifiers attached to a listener at registration time.
///
/// Replaces the boolean-or-options third argument of the conventional API
/// with an explicit struct passed by value. All modifiers default to
/// `false`.
///
/// `capture` participates in listener identity: a capturing and a
/// non-capturing registration of the same callback are distinct entries.
/// `once` and `passive` do not; on a duplicate registration the *first*
/// entry's modifiers win.
///
/// # Example
///
/// ```
/// use lyssna_core::ListenerOptions;
///
/// let opts = ListenerOptions::new().with_once(true).with_passive(true);
/// assert!(!opts.capture);
/// assert!(opts.once);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Classifies the listener for a caller-level capture-phase walk.
    pub capture: bool,
    /// Remove the listener immediately before its first invocation.
    pub once: bool,
    /// The listener may not prevent the event's default action.
    pub passive: bool,
}

impl ListenerOptions {
    /// All modifiers off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture flag.
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// Set the once flag.
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Set the passive flag.
    pub fn with_passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }
}

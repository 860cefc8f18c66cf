#![forbid(unsafe_code)]

//! Edit session: the two-state re-entrancy guard around programmatic writes.
//!
//! A text widget typically re-notifies its watchers whenever text is written
//! programmatically. The controller's own rewrites must not be processed as
//! fresh user edits, so every logical edit runs inside an [`ApplyScope`]
//! during which the session is [`SessionState::Applying`] and incoming
//! notifications are dropped.
//!
//! The session is shared through `Rc` so that adapter callbacks can consult
//! it without borrowing the controller.
//!
//! # Invariants
//!
//! 1. At most one logical edit is in flight: the state is `Applying` exactly
//!    while at least one [`ApplyScope`] is alive.
//! 2. Scopes nest; only dropping the outermost scope returns to `Idle`.
//! 3. [`EditSession::accept_notification`] returns `false` for every
//!    notification that arrives while `Applying`, and counts it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Whether a logical edit is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Ready to accept an external edit notification.
    #[default]
    Idle,
    /// A programmatic rewrite is in progress; notifications are ignored.
    Applying,
}

/// Shared re-entrancy guard for one text field.
#[derive(Default)]
pub struct EditSession {
    state: Cell<SessionState>,
    suppressed: Cell<u64>,
}

impl EditSession {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Whether a logical edit is in flight.
    #[must_use]
    pub fn is_applying(&self) -> bool {
        self.state.get() == SessionState::Applying
    }

    /// Enter a logical edit.
    ///
    /// When the session is already applying, the returned scope is nested and
    /// leaves the state alone on drop.
    #[must_use = "dropping the scope ends the logical edit"]
    pub fn enter(self: &Rc<Self>) -> ApplyScope {
        let outermost = !self.is_applying();
        self.state.set(SessionState::Applying);
        ApplyScope {
            session: Rc::clone(self),
            outermost,
        }
    }

    /// Begin a logical edit only if none is in flight.
    ///
    /// Returns `None` while applying. Unlike [`enter`](Self::enter) this
    /// never nests.
    #[must_use = "dropping the scope ends the logical edit"]
    pub fn try_begin(self: &Rc<Self>) -> Option<ApplyScope> {
        if self.is_applying() {
            None
        } else {
            Some(self.enter())
        }
    }

    /// Gate an incoming change notification.
    ///
    /// Returns `true` when idle. While applying, records the notification as
    /// suppressed and returns `false`.
    pub fn accept_notification(&self) -> bool {
        if self.is_applying() {
            self.suppressed.set(self.suppressed.get() + 1);
            false
        } else {
            true
        }
    }

    /// Notifications dropped so far because they arrived while applying.
    #[must_use]
    pub fn suppressed_notifications(&self) -> u64 {
        self.suppressed.get()
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("state", &self.state.get())
            .field("suppressed", &self.suppressed.get())
            .finish()
    }
}

/// RAII guard for one logical edit. See [`EditSession::enter`].
#[must_use = "dropping the scope ends the logical edit"]
pub struct ApplyScope {
    session: Rc<EditSession>,
    outermost: bool,
}

impl ApplyScope {
    /// Whether this scope will return the session to `Idle` when dropped.
    #[must_use]
    pub fn is_outermost(&self) -> bool {
        self.outermost
    }
}

impl Drop for ApplyScope {
    fn drop(&mut self) {
        if self.outermost {
            self.session.state.set(SessionState::Idle);
        }
    }
}

impl fmt::Debug for ApplyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyScope")
            .field("outermost", &self.outermost)
            .finish()
    }
}

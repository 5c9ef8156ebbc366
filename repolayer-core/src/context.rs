//! Transactional context passed through every repository operation.

use std::fmt;

/// An optional in-flight unit of work against the store.
///
/// `Detached` makes the backend run the operation session-less; `Active`
/// scopes it to a caller-owned session handle. The detached fallback is an
/// explicit variant rather than a nullable reference, so both branches are
/// visible at every call site and testable.
///
/// The context is created by the caller, passed through unchanged, and never
/// retained beyond the call.
pub enum TxnContext<'a, S> {
    /// Run the single operation outside any session.
    Detached,
    /// Run the operation inside the caller's session.
    Active(&'a mut S),
}

impl<'a, S> TxnContext<'a, S> {
    /// Consumes the context, yielding the session handle if one is active.
    pub fn session(self) -> Option<&'a mut S> {
        match self {
            TxnContext::Detached => None,
            TxnContext::Active(session) => Some(session),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TxnContext::Active(_))
    }
}

impl<S> Default for TxnContext<'_, S> {
    fn default() -> Self {
        TxnContext::Detached
    }
}

impl<S> fmt::Debug for TxnContext<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxnContext::Detached => f.write_str("TxnContext::Detached"),
            TxnContext::Active(_) => f.write_str("TxnContext::Active"),
        }
    }
}

impl<'a, S> From<&'a mut S> for TxnContext<'a, S> {
    fn from(session: &'a mut S) -> Self {
        TxnContext::Active(session)
    }
}

impl<'a, S> From<Option<&'a mut S>> for TxnContext<'a, S> {
    fn from(session: Option<&'a mut S>) -> Self {
        match session {
            Some(session) => TxnContext::Active(session),
            None => TxnContext::Detached,
        }
    }
}

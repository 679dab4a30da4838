//! Session store: the single source of truth for the bearer token.
//!
//! "Signed in" is derived, never stored: it is true exactly when a
//! non-empty token is held. The store performs no network calls and no
//! token validation.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use zeroize::Zeroize;

use super::observer::{SubscriptionId, Subscribers};

/// Snapshot of the authentication state handed to subscribers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
}

impl Session {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn signed_in(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signed_in", &self.signed_in())
            .finish()
    }
}

/// Process-wide holder of the current access token.
///
/// Shared via `Arc` and passed explicitly to every component that needs it.
pub struct SessionStore {
    state: RwLock<Session>,
    subscribers: Subscribers<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Session::default()),
            subscribers: Subscribers::new(),
        }
    }

    /// Replace the stored token unconditionally.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref mut old) = state.access_token {
                old.zeroize();
            }
            state.access_token = Some(token.into());
            state.clone()
        };
        self.subscribers.notify(&snapshot);
    }

    /// Current token, read fresh on every call.
    pub fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    pub fn signed_in(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .signed_in()
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and wipe the token. Subscribers are notified even when the
    /// store was already empty.
    ///
    /// Prefer `AuthState::sign_out`, which clears the profile in the same call.
    pub fn clear(&self) {
        let snapshot = self.reset();
        self.subscribers.notify(&snapshot);
    }

    /// Wipe the token without notifying. Paired with `publish` by
    /// `AuthState::sign_out` so both stores change before anyone is told.
    pub(crate) fn reset(&self) -> Session {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(ref mut old) = state.access_token {
            old.zeroize();
        }
        state.access_token = None;
        state.clone()
    }

    pub(crate) fn publish(&self, snapshot: &Session) {
        self.subscribers.notify(snapshot);
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_starts_signed_out() {
        let store = SessionStore::new();
        assert!(!store.signed_in());
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn test_signed_in_tracks_token() {
        let store = SessionStore::new();
        store.set_access_token("T");
        assert!(store.signed_in());
        assert_eq!(store.access_token().as_deref(), Some("T"));

        store.set_access_token("");
        assert!(!store.signed_in());

        store.set_access_token("U");
        store.clear();
        assert!(!store.signed_in());
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let store = SessionStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        store.subscribe(move |session| s.lock().unwrap().push(session.signed_in()));

        store.set_access_token("T");
        store.clear();
        store.clear();

        assert_eq!(*seen.lock().unwrap(), vec![true, false, false]);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = Arc::new(SessionStore::new());
        let observed = Arc::new(Mutex::new(None));

        let inner = Arc::clone(&store);
        let o = Arc::clone(&observed);
        store.subscribe(move |_| *o.lock().unwrap() = inner.access_token());

        store.set_access_token("T");
        assert_eq!(observed.lock().unwrap().as_deref(), Some("T"));
    }

    #[test]
    fn test_debug_hides_token() {
        let store = SessionStore::new();
        store.set_access_token("secret-token");
        let rendered = format!("{:?}", store.snapshot());
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("signed_in: true"));
    }
}

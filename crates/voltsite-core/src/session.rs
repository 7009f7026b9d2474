//! Session-scoped state: the admin gate and the promotional-modal flag.
//!
//! The gate is explicitly low-assurance: a shared-secret equality check
//! that controls UI visibility, not a security boundary. There is no
//! lockout, rate limiting, or hashing.

use tracing::{debug, warn};

/// Storage key for the admin authentication flag.
const AUTH_KEY: &str = "voltsite_admin_auth";

/// Storage key for the promotional-modal-seen flag.
const PROMO_KEY: &str = "voltsite_promo_seen";

/// Session-lifetime string storage.
///
/// The in-memory implementation backs tests and native hosts; a browser
/// host would implement this over its session storage. Entries live for
/// the session and are gone when it ends.
pub trait SessionStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str);
    /// Remove a value.
    fn remove(&mut self, key: &str);
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Gate for the admin area, held and passed down explicitly by the
/// application rather than kept as an ambient global.
#[derive(Debug, Clone)]
pub struct SessionGate<S: SessionStore> {
    secret: String,
    store: S,
}

impl<S: SessionStore> SessionGate<S> {
    /// Create a gate with the configured secret over a session store. The
    /// authenticated state is whatever the store already holds, so a
    /// persisted session survives an application restart within the same
    /// browser session.
    pub fn new(secret: impl Into<String>, store: S) -> Self {
        Self {
            secret: secret.into(),
            store,
        }
    }

    /// Compare `candidate` byte-for-byte against the configured secret.
    /// Sets the session flag on match; on mismatch the flag is left
    /// unset and `false` is returned.
    pub fn login(&mut self, candidate: &str) -> bool {
        if candidate.as_bytes() == self.secret.as_bytes() {
            self.store.set(AUTH_KEY, "true");
            debug!("admin session opened");
            true
        } else {
            warn!("admin login rejected");
            false
        }
    }

    /// Clear the session flag unconditionally.
    pub fn logout(&mut self) {
        self.store.remove(AUTH_KEY);
        debug!("admin session closed");
    }

    /// Pure read of the session flag.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.get(AUTH_KEY).as_deref() == Some("true")
    }

    /// Whether the promotional modal was already shown this session.
    #[must_use]
    pub fn promo_seen(&self) -> bool {
        self.store.get(PROMO_KEY).as_deref() == Some("true")
    }

    /// Record that the promotional modal was shown this session.
    pub fn mark_promo_seen(&mut self) {
        self.store.set(PROMO_KEY, "true");
    }

    /// Access the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

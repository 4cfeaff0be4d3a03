//! Session token storage.
//!
//! # Design
//! - The bearer token is the only auth state; absence means unauthenticated.
//! - Stores are passthroughs: every read goes to the backing storage.
//! - Blank values read back as absent so a cleared field never authenticates.

use std::cell::RefCell;

/// Durable holder of the session token.
pub trait SessionStore {
    /// Current token, if one is stored.
    fn token(&self) -> Option<String>;
    /// Replace the stored token.
    fn store_token(&self, token: &str);
    /// Forget the stored token.
    fn clear(&self);

    /// Whether a token is currently stored.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Treat blank tokens as absent.
#[must_use]
pub fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// In-memory session used when durable storage is unavailable.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RefCell<Option<String>>,
}

impl MemorySession {
    /// Session pre-populated with a token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(normalize_token(Some(token.to_string()))),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store_token(&self, token: &str) {
        *self.token.borrow_mut() = normalize_token(Some(token.to_string()));
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

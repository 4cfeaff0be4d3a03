//! Browser persistence for the session token.

use crate::core::auth::{SessionStore, normalize_token};
use gloo::storage::{LocalStorage, Storage};

/// Session stored as a plain string under a `localStorage` key.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocalStorageSession {
    key: &'static str,
}

impl LocalStorageSession {
    pub(crate) const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        match LocalStorage::raw().get_item(self.key) {
            Ok(value) => normalize_token(value),
            Err(err) => {
                tracing::warn!(key = self.key, error = ?err, "session token unreadable");
                None
            }
        }
    }

    fn store_token(&self, token: &str) {
        if let Err(err) = LocalStorage::raw().set_item(self.key, token) {
            tracing::warn!(key = self.key, error = ?err, "session token not persisted");
        }
    }

    fn clear(&self) {
        if let Err(err) = LocalStorage::raw().remove_item(self.key) {
            tracing::warn!(key = self.key, error = ?err, "session token not cleared");
        }
    }
}

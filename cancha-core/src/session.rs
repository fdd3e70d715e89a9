//! In-memory session store for the authenticated admin user.
//!
//! The store lives for the lifetime of the process (the CLI analog of the
//! browser tab). It is read by every outgoing request and written only by
//! login and logout.

use std::sync::RwLock;

use crate::error::ApiError;

/// An authenticated session: an opaque bearer token plus the backend's
/// user id when the login response included one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<i64>,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: Option<i64>) -> Self {
        Self {
            token: token.into(),
            user_id,
        }
    }
}

/// Single process-wide session slot.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current session, if any.
    pub fn get(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    /// Replaces the current session. An empty token is rejected.
    pub fn set(&self, session: Session) -> Result<(), ApiError> {
        if session.token.trim().is_empty() {
            return Err(ApiError::Validation(
                "Session token cannot be empty".to_string(),
            ));
        }
        *self.inner.write().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    /// Removes the current session.
    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }

    pub fn has(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.get().map(|s| s.token)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.get().and_then(|s| s.user_id)
    }
}

//! Session store
//!
//! Holds the authentication token and user identity for the running client.
//! The token is mirrored to durable storage under [`TOKEN_KEY`] so a restart
//! keeps the user signed in. Authentication is optimistic: nothing here
//! validates, refreshes or expires the token, and only an explicit
//! [`SessionStore::logout`] clears it.

mod storage;

pub use storage::{FileStorage, MemoryStorage, StorageError, TokenStorage};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::SessionUser;

/// Storage key the token is persisted under
pub const TOKEN_KEY: &str = "token";

/// Snapshot of the client session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Shared handle to the session; clones observe the same state.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn TokenStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    /// Create a store, restoring any token already present in `storage`.
    ///
    /// The user identity is not persisted and starts out unknown.
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Result<Self, StorageError> {
        let token = storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        if token.is_some() {
            tracing::debug!("Restored session token from storage");
        }

        Ok(Self {
            state: Arc::new(RwLock::new(Session { token, user: None })),
            storage,
        })
    }

    /// Store backed by process memory only
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Persist `token` and make it the active session.
    pub fn login(&self, token: impl Into<String>, user: SessionUser) -> Result<(), StorageError> {
        let token = token.into();
        self.storage.set(TOKEN_KEY, &token)?;

        tracing::info!(user = %user.username, "Session started");
        let mut state = self.write();
        state.token = Some(token);
        state.user = Some(user);
        Ok(())
    }

    /// Clear the persisted token and the in-memory session.
    pub fn logout(&self) -> Result<(), StorageError> {
        let removed = self.storage.remove(TOKEN_KEY);

        let mut state = self.write();
        state.token = None;
        state.user = None;
        tracing::info!("Session ended");

        removed
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn admin() -> SessionUser {
        SessionUser {
            id: 1,
            username: "admin".to_string(),
            email: "admin@eali.bi".to_string(),
        }
    }

    #[test]
    fn test_login_then_logout() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());

        store.login("tok-123", admin()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.user(), Some(admin()));

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::in_memory();
        let handle = store.clone();

        store.login("tok-123", admin()).unwrap();
        assert!(handle.is_authenticated());
    }

    #[test]
    fn test_login_persists_token() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::restore(storage.clone()).unwrap();

        store.login("tok-123", admin()).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-123"));

        store.logout().unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_restore_from_file_storage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let first = SessionStore::restore(Arc::new(FileStorage::new(&path))).unwrap();
        first.login("tok-123", admin()).unwrap();

        let second = SessionStore::restore(Arc::new(FileStorage::new(&path))).unwrap();
        assert!(second.is_authenticated());
        assert_eq!(second.token().as_deref(), Some("tok-123"));
        assert_eq!(second.user(), None);
    }

    #[test]
    fn test_restore_ignores_empty_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "").unwrap();

        let store = SessionStore::restore(storage).unwrap();
        assert!(!store.is_authenticated());
    }
}

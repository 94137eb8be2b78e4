//! Session store: the durable auth-token slot plus its in-memory mirror.
//!
//! The store is created once at process start and handed to whoever needs it
//! (controller, UI context, CLI). Cloning is cheap and every clone shares the
//! same state.
//!
//! The credential is trusted as-is. Nothing here decodes, verifies or expires
//! it; a token stays valid until `logout()`.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::storage::Storage;
use crate::types::Session;

/// Durable, observable session state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Storage,
    state: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    /// Create a store over `storage`. The in-memory session starts empty;
    /// call [`restore`](Self::restore) to load the persisted token.
    pub fn new(storage: Storage) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            storage,
            state: Arc::new(tx),
        }
    }

    /// Create a store and immediately restore the persisted session.
    pub fn open(storage: Storage) -> CoreResult<Self> {
        let store = Self::new(storage);
        store.restore()?;
        Ok(store)
    }

    /// Rebuild the in-memory session from the persisted token, if any.
    ///
    /// Returns the restored session.
    pub fn restore(&self) -> CoreResult<Option<Session>> {
        let session = self.storage.load_auth_token()?.map(Session::new);
        match &session {
            Some(_) => info!("Restored persisted session"),
            None => debug!("No persisted session"),
        }
        self.state.send_replace(session.clone());
        Ok(session)
    }

    /// Persist `token` and mark the user as authenticated.
    ///
    /// Any non-empty credential is accepted.
    pub fn login(&self, token: impl Into<String>) -> CoreResult<Session> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CoreError::EmptyToken);
        }

        self.storage.save_auth_token(&token)?;
        let session = Session::new(token);
        self.state.send_replace(Some(session.clone()));
        info!("Logged in");
        Ok(session)
    }

    /// Clear the persisted token and the in-memory session. Idempotent.
    ///
    /// The in-memory session is cleared even when the storage write fails,
    /// so the error is returned only after the user is already signed out.
    pub fn logout(&self) -> CoreResult<()> {
        self.logout_with(|| self.storage.clear_auth_token())
    }

    fn logout_with(&self, clear_persisted: impl FnOnce() -> CoreResult<()>) -> CoreResult<()> {
        let previous = self.state.send_replace(None);
        if previous.is_some() {
            info!("Logged out");
        }
        clear_persisted().inspect_err(|e| warn!(error = %e, "Failed to clear persisted token"))
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Receive a notification on every login, logout or restore.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

/// Issue a credential the way the mock identity provider does.
///
/// The value is opaque to the rest of the system, like a real provider's.
pub fn mock_credential() -> String {
    format!("mock-oauth-{}", ulid::Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().join("coinpulse.redb")).unwrap();
        (SessionStore::new(storage), temp_dir)
    }

    #[test]
    fn test_starts_logged_out() {
        let (store, _temp) = create_store();
        assert!(!store.is_authenticated());
        assert!(store.restore().unwrap().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn test_login_sets_session() {
        let (store, _temp) = create_store();

        let session = store.login("abc.def.ghi").unwrap();
        assert_eq!(session.token(), "abc.def.ghi");
        assert!(store.is_authenticated());
        assert_eq!(store.session().unwrap().token(), "abc.def.ghi");
    }

    #[test]
    fn test_login_rejects_empty_token() {
        let (store, _temp) = create_store();

        assert!(matches!(store.login(""), Err(CoreError::EmptyToken)));
        assert!(matches!(store.login("   "), Err(CoreError::EmptyToken)));
        assert!(!store.is_authenticated());
        assert!(store.restore().unwrap().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (store, _temp) = create_store();
        store.login("token").unwrap();

        store.logout().unwrap();
        assert!(!store.is_authenticated());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.restore().unwrap().is_none());
    }

    #[test]
    fn test_logout_signs_out_even_if_storage_fails() {
        let (store, _temp) = create_store();
        store.login("token").unwrap();
        let mut rx = store.subscribe();

        let result = store.logout_with(|| Err(CoreError::Storage("disk full".into())));
        assert!(matches!(result, Err(CoreError::Storage(_))));
        assert!(!store.is_authenticated());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_login_then_restore_in_fresh_process() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("coinpulse.redb");

        {
            let store = SessionStore::new(Storage::new(&db_path).unwrap());
            store.login("survives-restart").unwrap();
        }

        let store = SessionStore::open(Storage::new(&db_path).unwrap()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.session().unwrap().token(), "survives-restart");
    }

    #[test]
    fn test_clones_share_state() {
        let (store, _temp) = create_store();
        let other = store.clone();

        store.login("shared").unwrap();
        assert!(other.is_authenticated());

        other.logout().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let (store, _temp) = create_store();
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_none());

        store.login("watched").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().token(), "watched");

        store.logout().unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_mock_credential_is_unique() {
        let a = mock_credential();
        let b = mock_credential();
        assert!(a.starts_with("mock-oauth-"));
        assert_ne!(a, b);
    }
}

use std::sync::Arc;

use parking_lot::RwLock;

use crate::storage;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("user name required")]
    EmptyName,
}

/// Holds the in-memory session and mirrors it into the persisted slot.
/// Persistence is best-effort: a failing store degrades to a session that is
/// not remembered across restarts, never an error surfaced to the caller.
pub struct Manager {
    store: Option<Arc<storage::Store>>,
    current: RwLock<Option<String>>,
}

impl Manager {
    pub fn new(store: Option<Arc<storage::Store>>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Loads the persisted user name into memory, if one exists.
    pub fn restore(&self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Ok(Some(name)) = store.get_user() {
            *self.current.write() = Some(name);
        }
    }

    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Signs the given user in and remembers them. Idempotent under repeated
    /// identical calls.
    pub fn login(&self, name: &str) -> Result<String, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        *self.current.write() = Some(name.to_string());
        if let Some(store) = self.store.as_ref() {
            let _ = store.set_user(name);
        }
        Ok(name.to_string())
    }

    /// Clears the in-memory session and erases the persisted slot, so no
    /// stale value survives.
    pub fn logout(&self) {
        *self.current.write() = None;
        if let Some(store) = self.store.as_ref() {
            let _ = store.clear_user();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn temp_store(dir: &tempfile::TempDir) -> Arc<storage::Store> {
        Arc::new(
            storage::Store::open(storage::Options {
                path: Some(dir.path().join("state.db")),
            })
            .unwrap(),
        )
    }

    #[test]
    fn login_sets_and_persists_user() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        let manager = Manager::new(Some(store.clone()));

        manager.login("alice").unwrap();
        assert_eq!(manager.current(), Some("alice".to_string()));
        assert_eq!(store.get_user().unwrap(), Some("alice".to_string()));
    }

    #[test]
    fn restore_picks_up_persisted_user() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        store.set_user("alice").unwrap();

        let manager = Manager::new(Some(store));
        assert_eq!(manager.current(), None);
        manager.restore();
        assert_eq!(manager.current(), Some("alice".to_string()));
    }

    #[test]
    fn logout_clears_memory_and_slot() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        let manager = Manager::new(Some(store.clone()));

        manager.login("alice").unwrap();
        manager.logout();
        assert_eq!(manager.current(), None);
        assert_eq!(store.get_user().unwrap(), None);
    }

    #[test]
    fn blank_login_is_rejected() {
        let manager = Manager::new(None);
        assert!(manager.login("   ").is_err());
        assert_eq!(manager.current(), None);
    }

    #[test]
    fn works_without_a_store() {
        let manager = Manager::new(None);
        manager.login("alice").unwrap();
        assert!(manager.is_authenticated());
        manager.logout();
        assert!(!manager.is_authenticated());
    }
}

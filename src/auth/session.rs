use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-process session table: opaque token → user id.
///
/// Sessions hold nothing but the user id and live only as long as the
/// process; no expiry is modeled. Clones share the same table.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for the given user.
    pub fn create(&self, user_id: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.write().insert(token, user_id.to_string());
        token
    }

    /// The user id the token was issued for, if it is still valid.
    pub fn resolve(&self, token: &Uuid) -> Option<String> {
        self.read().get(token).cloned()
    }

    /// Drops the token. A no-op for tokens that were never issued.
    pub fn revoke(&self, token: &Uuid) {
        self.write().remove(token);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, String>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, String>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

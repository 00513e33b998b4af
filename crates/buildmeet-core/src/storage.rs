//! Key-value persistence for the signed-in profile.

use crate::pins::LocalUser;
use std::collections::HashMap;
use thiserror::Error;

/// Key the local user profile is stored under.
pub const LOCAL_USER_KEY: &str = "buildmeet_local_user";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Flat key-value storage for the signed-in profile.
///
/// Payloads are JSON. Implementations may be in-memory or backed by
/// whatever the platform offers; persistence is best-effort.
pub trait ProfileStorage {
    /// Save the profile under [`LOCAL_USER_KEY`].
    fn save_user(&mut self, user: &LocalUser) -> Result<(), StorageError>;

    /// Load the profile, if one was saved.
    fn load_user(&self) -> Result<Option<LocalUser>, StorageError>;

    /// Forget the profile (sign-out).
    fn clear_user(&mut self);
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStorage for MemoryStorage {
    fn save_user(&mut self, user: &LocalUser) -> Result<(), StorageError> {
        let payload = serde_json::to_string(user)?;
        self.values.insert(LOCAL_USER_KEY.to_string(), payload);
        Ok(())
    }

    fn load_user(&self) -> Result<Option<LocalUser>, StorageError> {
        match self.values.get(LOCAL_USER_KEY) {
            Some(payload) => Ok(Some(serde_json::from_str(payload)?)),
            None => Ok(None),
        }
    }

    fn clear_user(&mut self) {
        self.values.remove(LOCAL_USER_KEY);
    }
}

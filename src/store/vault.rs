//! Persistence of the access token across process runs.
//!
//! The system keychain (via `keyring`) holds the token between invocations.
//! The session store stays the authority at runtime; the vault only mirrors
//! it through a subscription.

use std::sync::{Arc, Mutex, PoisonError};

use keyring::Entry;
use thiserror::Error;

use super::observer::SubscriptionId;
use super::session::SessionStore;

/// Default keychain service name.
pub const DEFAULT_SERVICE_NAME: &str = "io.swarmy.cli";

/// Fixed keychain account under which the access token is stored.
const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Keychain operation failed: {0}")]
    OperationFailed(String),
}

impl From<keyring::Error> for VaultError {
    fn from(err: keyring::Error) -> Self {
        VaultError::OperationFailed(err.to_string())
    }
}

/// Storage backend for the persisted token.
pub trait TokenVault: Send + Sync {
    /// Returns `None` if nothing was stored (never logged in, or logged out).
    fn load(&self) -> Result<Option<String>, VaultError>;
    fn store(&self, token: &str) -> Result<(), VaultError>;
    /// Idempotent: deleting an absent entry succeeds.
    fn delete(&self) -> Result<(), VaultError>;
}

/// Token storage in the OS keychain.
pub struct KeychainVault {
    service: String,
}

impl KeychainVault {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, VaultError> {
        Ok(Entry::new(&self.service, ACCESS_TOKEN_KEY)?)
    }
}

impl TokenVault for KeychainVault {
    fn load(&self) -> Result<Option<String>, VaultError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(VaultError::from(e)),
        }
    }

    fn store(&self, token: &str) -> Result<(), VaultError> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), VaultError> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted, idempotent
            Err(e) => Err(VaultError::from(e)),
        }
    }
}

/// In-process vault, used by tests and when no keychain is wanted.
#[derive(Default)]
pub struct MemoryVault {
    token: Mutex<Option<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenVault for MemoryVault {
    fn load(&self) -> Result<Option<String>, VaultError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, token: &str) -> Result<(), VaultError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), VaultError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Restore the persisted token into `session`, then keep the vault in sync.
///
/// The restore happens before subscribing so the loaded token is not written
/// straight back. Afterwards every token change is stored and every clear
/// (explicit logout or a 401 teardown) deletes the entry. Vault failures
/// after start-up are logged and never affect the in-memory session.
pub fn persist_session(
    session: &SessionStore,
    vault: Arc<dyn TokenVault>,
) -> Result<SubscriptionId, VaultError> {
    match vault.load()? {
        Some(token) if !token.is_empty() => {
            log::debug!("Restored session from vault");
            session.set_access_token(token);
        }
        _ => log::debug!("No persisted session"),
    }

    let id = session.subscribe(move |state| {
        let result = match state.access_token() {
            Some(token) if !token.is_empty() => vault.store(token),
            _ => vault.delete(),
        };
        if let Err(e) = result {
            log::warn!("Failed to persist session: {}", e);
        }
    });
    Ok(id)
}

//! Profile store: cache of the last-fetched account profile.
//!
//! Only meaningful while the session is signed in. It is cleared together
//! with the session through `AuthState::sign_out`.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::observer::{SubscriptionId, Subscribers};

/// Lifecycle of the account's postage batch on the storage network.
///
/// Matches the backend's SCREAMING_SNAKE_CASE strings. Values this client
/// does not know about deserialize as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostageBatchStatus {
    Creating,
    Created,
    Removed,
    FailedToCreate,
    FailedToTopUp,
    FailedToDilute,
    #[serde(other)]
    Unknown,
}

/// Account-facing attributes returned by GET /users/me.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub email: Option<String>,
    pub email_verified: bool,
    pub organization_id: Option<u64>,
    pub postage_batch_id: Option<String>,
    pub postage_batch_status: Option<PostageBatchStatus>,
}

impl Profile {
    /// Uploading needs a postage batch that is fully created.
    pub fn can_upload(&self) -> bool {
        self.postage_batch_status == Some(PostageBatchStatus::Created)
    }

    /// Why uploading is disabled, or `None` when it is allowed.
    pub fn upload_block_reason(&self) -> Option<&'static str> {
        match self.postage_batch_status {
            Some(PostageBatchStatus::Created) => None,
            None | Some(PostageBatchStatus::Removed) => {
                Some("Subscription needed to upload files.")
            }
            Some(PostageBatchStatus::Creating) => Some(
                "Connecting your account with Swarm. This can take up to a few minutes.",
            ),
            Some(PostageBatchStatus::FailedToCreate)
            | Some(PostageBatchStatus::FailedToTopUp)
            | Some(PostageBatchStatus::FailedToDilute)
            | Some(PostageBatchStatus::Unknown) => {
                Some("Account issue detected. Uploading is suspended. Please contact support.")
            }
        }
    }
}

pub struct ProfileStore {
    state: RwLock<Profile>,
    subscribers: Subscribers<Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Profile::default()),
            subscribers: Subscribers::new(),
        }
    }

    /// Overwrite the whole record. No merge with the previous value.
    pub fn set_profile(&self, profile: Profile) {
        self.mutate(|state| *state = profile);
    }

    /// Narrow update after a successful verification round-trip.
    pub fn set_email_verified(&self, verified: bool) {
        self.mutate(|state| state.email_verified = verified);
    }

    pub fn clear(&self) {
        self.mutate(|state| *state = Profile::default());
    }

    /// Reset without notifying; see `SessionStore::reset`.
    pub(crate) fn reset(&self) -> Profile {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = Profile::default();
        state.clone()
    }

    pub(crate) fn publish(&self, snapshot: &Profile) {
        self.subscribers.notify(snapshot);
    }

    pub fn profile(&self) -> Profile {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn can_upload(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .can_upload()
    }

    pub fn upload_block_reason(&self) -> Option<&'static str> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upload_block_reason()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Profile) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn mutate(&self, apply: impl FnOnce(&mut Profile)) {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut state);
            state.clone()
        };
        self.subscribers.notify(&snapshot);
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

//! One-time-per-load reconciliation of session and profile.
//!
//! With a token present, exactly one profile fetch is issued and the phase
//! stays `Loading` until it finishes, so nothing downstream sees an empty
//! profile. Without a token the route tree is released immediately and no
//! network call is made.

use tokio::sync::watch;

use crate::api::{auth, ApiClient, ApiError};
use crate::state::AuthState;
use crate::store::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// Show the loading placeholder.
    Loading,
    /// Mount the route tree.
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// No token at start; nothing fetched.
    Anonymous,
    ProfileLoaded,
    /// The fetch failed. On 401 the session is already gone; otherwise the
    /// profile simply stays empty.
    ProfileUnavailable,
}

/// Source of the profile snapshot.
///
/// `ApiClient` implements this against GET /users/me. Tests substitute a
/// mock to control timing and failures.
#[allow(async_fn_in_trait)]
pub trait ProfileSource {
    async fn fetch_profile(&self) -> Result<Profile, ApiError>;
}

impl ProfileSource for ApiClient {
    async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        auth::get_profile(self).await
    }
}

pub struct Bootstrap {
    auth: AuthState,
    phase: watch::Sender<BootPhase>,
}

impl Bootstrap {
    /// The phase starts as `Loading` until `run` decides otherwise.
    pub fn new(auth: AuthState) -> Self {
        let (phase, _) = watch::channel(BootPhase::Loading);
        Self { auth, phase }
    }

    pub fn phase(&self) -> BootPhase {
        *self.phase.borrow()
    }

    /// Watch phase transitions (e.g. to drive a spinner).
    pub fn subscribe(&self) -> watch::Receiver<BootPhase> {
        self.phase.subscribe()
    }

    /// Run the bootstrap. Always ends in `BootPhase::Ready`.
    pub async fn run<S: ProfileSource>(&self, source: &S) -> BootOutcome {
        if !self.auth.signed_in() {
            log::debug!("No session, skipping profile fetch");
            self.phase.send_replace(BootPhase::Ready);
            return BootOutcome::Anonymous;
        }

        self.phase.send_replace(BootPhase::Loading);
        let outcome = match source.fetch_profile().await {
            Ok(profile) => {
                self.auth.profile.set_profile(profile);
                BootOutcome::ProfileLoaded
            }
            Err(e) => {
                if e.is_auth_failure() {
                    log::info!("Stored session is no longer valid");
                } else {
                    log::warn!("Profile fetch failed: {}", e);
                }
                BootOutcome::ProfileUnavailable
            }
        };
        self.phase.send_replace(BootPhase::Ready);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PostageBatchStatus;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Notify;

    // ── Mock profile sources ─────────────────────────────────────────────

    struct GatedSource {
        release: Notify,
        calls: AtomicU32,
        profile: Profile,
    }

    impl GatedSource {
        fn new(profile: Profile) -> Self {
            Self {
                release: Notify::new(),
                calls: AtomicU32::new(0),
                profile,
            }
        }
    }

    impl ProfileSource for GatedSource {
        async fn fetch_profile(&self) -> Result<Profile, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(self.profile.clone())
        }
    }

    /// Fails like the real client would: a 401 tears the session down first.
    struct FailingSource {
        auth: AuthState,
        status: StatusCode,
    }

    impl ProfileSource for FailingSource {
        async fn fetch_profile(&self) -> Result<Profile, ApiError> {
            if self.status == StatusCode::UNAUTHORIZED {
                self.auth.sign_out();
                return Err(ApiError::Unauthorized);
            }
            Err(ApiError::Status {
                status: self.status,
                body: String::new(),
            })
        }
    }

    fn profile() -> Profile {
        Profile {
            email: Some("a@b.com".to_string()),
            email_verified: true,
            organization_id: Some(1),
            postage_batch_id: Some("batch".to_string()),
            postage_batch_status: Some(PostageBatchStatus::Created),
        }
    }

    #[tokio::test]
    async fn test_no_token_skips_fetch() {
        let auth = AuthState::default();
        let boot = Bootstrap::new(auth.clone());
        let source = GatedSource::new(profile());

        let outcome = boot.run(&source).await;

        assert_eq!(outcome, BootOutcome::Anonymous);
        assert_eq!(boot.phase(), BootPhase::Ready);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(auth.profile.profile(), Profile::default());
    }

    #[tokio::test]
    async fn test_loading_until_fetch_resolves() {
        let auth = AuthState::default();
        auth.session.set_access_token("T");
        let boot = Bootstrap::new(auth.clone());
        let source = GatedSource::new(profile());

        let check = async {
            // Let `run` reach the gated fetch.
            while source.calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            assert_eq!(boot.phase(), BootPhase::Loading);
            assert_eq!(auth.profile.profile(), Profile::default());
            source.release.notify_one();
        };

        let (outcome, ()) = tokio::join!(boot.run(&source), check);

        assert_eq!(outcome, BootOutcome::ProfileLoaded);
        assert_eq!(boot.phase(), BootPhase::Ready);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(auth.profile.profile(), profile());
    }

    #[tokio::test]
    async fn test_unauthorized_still_becomes_ready() {
        let auth = AuthState::default();
        auth.session.set_access_token("stale");
        let boot = Bootstrap::new(auth.clone());
        let source = FailingSource {
            auth: auth.clone(),
            status: StatusCode::UNAUTHORIZED,
        };

        assert_eq!(boot.run(&source).await, BootOutcome::ProfileUnavailable);
        assert_eq!(boot.phase(), BootPhase::Ready);
        assert!(!auth.signed_in());
    }

    #[tokio::test]
    async fn test_server_error_keeps_session() {
        let auth = AuthState::default();
        auth.session.set_access_token("T");
        let boot = Bootstrap::new(auth.clone());
        let source = FailingSource {
            auth: auth.clone(),
            status: StatusCode::BAD_GATEWAY,
        };

        assert_eq!(boot.run(&source).await, BootOutcome::ProfileUnavailable);
        assert_eq!(boot.phase(), BootPhase::Ready);
        assert!(auth.signed_in());
        assert_eq!(auth.profile.profile(), Profile::default());
    }

    #[tokio::test]
    async fn test_subscriber_sees_ready() {
        let auth = AuthState::default();
        let boot = Bootstrap::new(auth);
        let mut rx = boot.subscribe();
        assert_eq!(*rx.borrow(), BootPhase::Loading);

        boot.run(&GatedSource::new(profile())).await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), BootPhase::Ready);
    }
}
